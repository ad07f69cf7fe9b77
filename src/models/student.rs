use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::domain::{belts, derivation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "student_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StudentCategory {
    Child,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "student_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,
    pub category: StudentCategory,
    pub birth_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub contact: Option<String>,
    pub enrollment_date: NaiveDate,
    pub status: StudentStatus,
    pub notes: Option<String>,
    pub current_rank: String,
    pub modality: Option<String>,
    pub eligible_to_promote: bool,
    pub target_rank: Option<String>,
    pub weight_kg: Option<f64>,
    pub height: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert record for a student, used by the create endpoint and the bulk
/// import normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub full_name: String,
    pub category: StudentCategory,
    pub birth_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub contact: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<StudentStatus>,
    pub notes: Option<String>,
    pub current_rank: Option<String>,
    pub modality: Option<String>,
    #[serde(default)]
    pub eligible_to_promote: bool,
    pub target_rank: Option<String>,
    pub weight_kg: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub full_name: String,
    pub category: StudentCategory,
    pub birth_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub contact: Option<String>,
    pub status: Option<StudentStatus>,
    pub notes: Option<String>,
    pub current_rank: Option<String>,
    pub modality: Option<String>,
    #[serde(default)]
    pub eligible_to_promote: bool,
    pub target_rank: Option<String>,
    pub weight_kg: Option<f64>,
    pub height: Option<f64>,
}

/// Student record as returned to clients: the stored row enriched with the
/// derived fields, and the promotion target auto-filled for students
/// flagged eligible without an explicit target.
#[derive(Debug, Clone, Serialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    pub age: Option<i32>,
    pub bmi: Option<f64>,
    pub age_class: Option<&'static str>,
    pub weight_category: Option<&'static str>,
}

impl StudentView {
    pub fn enrich(mut student: Student, today: NaiveDate) -> Self {
        let age = derivation::age_on(student.birth_date, today);
        let bmi = derivation::bmi(student.weight_kg, student.height);
        let age_class = derivation::age_class(age).map(|c| c.label());
        let weight_category = derivation::weight_category(age, student.weight_kg);

        if student.eligible_to_promote && student.target_rank.is_none() {
            student.target_rank = belts::next_rank(&student.current_rank).map(str::to_owned);
        }

        StudentView {
            student,
            age,
            bmi,
            age_class,
            weight_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        Student {
            id: Uuid::new_v4(),
            full_name: "Ana Souza".to_string(),
            category: StudentCategory::Child,
            birth_date: NaiveDate::from_ymd_opt(2012, 6, 1),
            guardian_name: Some("Clara Souza".to_string()),
            contact: Some("(11) 98888-7777".to_string()),
            enrollment_date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            status: StudentStatus::Active,
            notes: None,
            current_rank: "Branca".to_string(),
            modality: Some("Judô Infantil".to_string()),
            eligible_to_promote: false,
            target_rank: None,
            weight_kg: Some(32.0),
            height: Some(140.0),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_enrich_derives_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let view = StudentView::enrich(sample_student(), today);

        assert_eq!(view.age, Some(12));
        assert_eq!(view.age_class, Some("Infantil"));
        assert_eq!(view.weight_category, Some("Até 34kg"));
        assert_eq!(view.bmi, Some(16.33));
        assert_eq!(view.student.target_rank, None);
    }

    #[test]
    fn test_enrich_autofills_promotion_target() {
        let mut student = sample_student();
        student.eligible_to_promote = true;
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let view = StudentView::enrich(student, today);
        assert_eq!(view.student.target_rank.as_deref(), Some("Cinza"));
    }

    #[test]
    fn test_enrich_keeps_explicit_target() {
        let mut student = sample_student();
        student.eligible_to_promote = true;
        student.target_rank = Some("Azul".to_string());
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let view = StudentView::enrich(student, today);
        assert_eq!(view.student.target_rank.as_deref(), Some("Azul"));
    }
}
