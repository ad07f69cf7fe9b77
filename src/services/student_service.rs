use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{UserRole, UserSession};
use crate::domain::access::{self, Action};
use crate::domain::belts;
use crate::errors::ApiError;
use crate::models::{NewStudent, Student, StudentStatus, StudentView, UpdateStudent};

const STUDENT_COLUMNS: &str = "id, full_name, category, birth_date, guardian_name, contact, \
     enrollment_date, status, notes, current_rank, modality, eligible_to_promote, target_rank, \
     weight_kg, height, created_at, updated_at";

#[derive(Clone)]
pub struct StudentService {
    db: PgPool,
}

impl StudentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List students visible to the caller, enriched with derived fields.
    /// Admins see everyone; a student sees only its own record.
    pub async fn list(&self, session: &UserSession) -> Result<Vec<StudentView>, ApiError> {
        let students = match session.role {
            UserRole::Admin => {
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students ORDER BY full_name"
                ))
                .fetch_all(&self.db)
                .await?
            }
            UserRole::Student => {
                let student_id = session.student_id.ok_or(ApiError::Forbidden)?;
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
                ))
                .bind(student_id)
                .fetch_all(&self.db)
                .await?
            }
            UserRole::Guest => return Err(ApiError::Forbidden),
        };

        let today = Utc::now().date_naive();
        Ok(students
            .into_iter()
            .map(|s| StudentView::enrich(s, today))
            .collect())
    }

    pub async fn get(
        &self,
        session: &UserSession,
        student_id: Uuid,
    ) -> Result<StudentView, ApiError> {
        if !access::authorize(session.role, session.student_id, student_id, Action::Read) {
            return Err(ApiError::Forbidden);
        }

        let student = self.fetch(student_id).await?;
        Ok(StudentView::enrich(student, Utc::now().date_naive()))
    }

    pub async fn create(&self, record: NewStudent) -> Result<Student, ApiError> {
        if record.full_name.trim().is_empty() {
            return Err(ApiError::validation("Name cannot be empty"));
        }

        self.insert(&record, Utc::now().date_naive()).await
    }

    /// Shared insert path for the create endpoint and the bulk import.
    pub async fn insert(
        &self,
        record: &NewStudent,
        today: NaiveDate,
    ) -> Result<Student, ApiError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (full_name, category, birth_date, guardian_name, contact, \
             enrollment_date, status, notes, current_rank, modality, eligible_to_promote, \
             target_rank, weight_kg, height)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(record.full_name.trim())
        .bind(record.category)
        .bind(record.birth_date)
        .bind(&record.guardian_name)
        .bind(&record.contact)
        .bind(record.enrollment_date.unwrap_or(today))
        .bind(record.status.unwrap_or(StudentStatus::Active))
        .bind(&record.notes)
        .bind(record.current_rank.as_deref().unwrap_or(belts::DEFAULT_RANK))
        .bind(&record.modality)
        .bind(record.eligible_to_promote)
        .bind(&record.target_rank)
        .bind(record.weight_kg)
        .bind(record.height)
        .fetch_one(&self.db)
        .await?;

        Ok(student)
    }

    pub async fn update(
        &self,
        student_id: Uuid,
        record: UpdateStudent,
    ) -> Result<Student, ApiError> {
        if record.full_name.trim().is_empty() {
            return Err(ApiError::validation("Name cannot be empty"));
        }

        // Promotion target is persisted at edit time so listings don't have
        // to re-derive it for flagged students
        let current_rank = record
            .current_rank
            .as_deref()
            .unwrap_or(belts::DEFAULT_RANK);
        let target_rank = match (&record.target_rank, record.eligible_to_promote) {
            (Some(explicit), _) => Some(explicit.clone()),
            (None, true) => belts::next_rank(current_rank).map(str::to_owned),
            (None, false) => None,
        };

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET full_name = $2, category = $3, birth_date = $4, \
             guardian_name = $5, contact = $6, status = $7, notes = $8, current_rank = $9, \
             modality = $10, eligible_to_promote = $11, target_rank = $12, weight_kg = $13, \
             height = $14, updated_at = NOW()
             WHERE id = $1
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(student_id)
        .bind(record.full_name.trim())
        .bind(record.category)
        .bind(record.birth_date)
        .bind(&record.guardian_name)
        .bind(&record.contact)
        .bind(record.status.unwrap_or(StudentStatus::Active))
        .bind(&record.notes)
        .bind(current_rank)
        .bind(&record.modality)
        .bind(record.eligible_to_promote)
        .bind(target_rank)
        .bind(record.weight_kg)
        .bind(record.height)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Student"))?;

        Ok(student)
    }

    pub async fn delete(&self, student_id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(student_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Student"));
        }

        Ok(())
    }

    async fn fetch(&self, student_id: Uuid) -> Result<Student, ApiError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(student_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Student"))
    }
}
