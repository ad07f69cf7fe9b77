use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::domain::derivation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "evaluation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Released,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Evaluation {
    pub id: Uuid,
    pub student_id: Uuid,
    pub evaluation_date: NaiveDate,
    pub discipline: Option<f64>,
    pub technique: Option<f64>,
    pub participation: Option<f64>,
    pub conduct: Option<f64>,
    pub notes: Option<String>,
    pub status: EvaluationStatus,
    pub released_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn average(&self) -> Option<f64> {
        derivation::score_average(&[
            self.discipline,
            self.technique,
            self.participation,
            self.conduct,
        ])
    }
}

/// Evaluation joined with the student name, plus the derived average.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EvaluationWithStudent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub evaluation_date: NaiveDate,
    pub discipline: Option<f64>,
    pub technique: Option<f64>,
    pub participation: Option<f64>,
    pub conduct: Option<f64>,
    pub notes: Option<String>,
    pub status: EvaluationStatus,
    pub released_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub full_name: String,
    #[sqlx(default)]
    pub average: Option<f64>,
}

impl EvaluationWithStudent {
    pub fn with_average(mut self) -> Self {
        self.average = derivation::score_average(&[
            self.discipline,
            self.technique,
            self.participation,
            self.conduct,
        ]);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvaluation {
    pub student_id: Uuid,
    pub evaluation_date: NaiveDate,
    pub discipline: Option<f64>,
    pub technique: Option<f64>,
    pub participation: Option<f64>,
    pub conduct: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<EvaluationStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEvaluation {
    pub evaluation_date: Option<NaiveDate>,
    pub discipline: Option<f64>,
    pub technique: Option<f64>,
    pub participation: Option<f64>,
    pub conduct: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<EvaluationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluationQuery {
    pub student_id: Option<Uuid>,
    // Accepted for backwards compatibility with older clients; admins see
    // every evaluation regardless of this flag.
    #[serde(default)]
    pub include_unreleased: bool,
}
