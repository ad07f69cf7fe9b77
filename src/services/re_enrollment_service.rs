use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::PgPool;

use crate::errors::ApiError;
use crate::models::{
    GenerateReEnrollment, ReEnrollment, ReEnrollmentDetails, ReEnrollmentLink,
    ReEnrollmentStatus, Student, StudentStatus,
};

const TOKEN_LENGTH: usize = 43;
const DEFAULT_AMOUNT: f64 = 20.00;

const RE_ENROLLMENT_COLUMNS: &str =
    "id, student_id, token, enrollment_date, amount_paid, status, created_at";

#[derive(Clone)]
pub struct ReEnrollmentService {
    db: PgPool,
}

impl ReEnrollmentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Issue an opaque single-use token for a student and return the
    /// public confirmation link.
    pub async fn generate(
        &self,
        request: GenerateReEnrollment,
    ) -> Result<ReEnrollmentLink, ApiError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        sqlx::query(
            "INSERT INTO re_enrollments (student_id, token, enrollment_date, amount_paid, status)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(request.student_id)
        .bind(&token)
        .bind(Utc::now().date_naive())
        .bind(request.amount_paid.unwrap_or(DEFAULT_AMOUNT))
        .bind(ReEnrollmentStatus::Pending)
        .execute(&self.db)
        .await
        .map_err(map_student_fk)?;

        let link = format!("/re-enrollment/{token}");
        Ok(ReEnrollmentLink { token, link })
    }

    /// Pending token details for the public confirmation page. Consumed or
    /// unknown tokens are indistinguishable.
    pub async fn get_by_token(&self, token: &str) -> Result<ReEnrollmentDetails, ApiError> {
        let re_enrollment = sqlx::query_as::<_, ReEnrollment>(&format!(
            "SELECT {RE_ENROLLMENT_COLUMNS} FROM re_enrollments
             WHERE token = $1 AND status = $2"
        ))
        .bind(token)
        .bind(ReEnrollmentStatus::Pending)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Re-enrollment link"))?;

        let student = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, category, birth_date, guardian_name, contact, \
             enrollment_date, status, notes, current_rank, modality, eligible_to_promote, \
             target_rank, weight_kg, height, created_at, updated_at
             FROM students WHERE id = $1",
        )
        .bind(re_enrollment.student_id)
        .fetch_one(&self.db)
        .await?;

        Ok(ReEnrollmentDetails {
            re_enrollment,
            student,
        })
    }

    /// Confirm a re-enrollment. The conditional update makes the token
    /// single-use: zero affected rows means unknown or already consumed,
    /// and the student status is left untouched in that case.
    pub async fn confirm(&self, token: &str) -> Result<(), ApiError> {
        let mut tx = self.db.begin().await?;

        let confirmed: Option<(uuid::Uuid,)> = sqlx::query_as(
            "UPDATE re_enrollments SET status = $2
             WHERE token = $1 AND status = $3
             RETURNING student_id",
        )
        .bind(token)
        .bind(ReEnrollmentStatus::Confirmed)
        .bind(ReEnrollmentStatus::Pending)
        .fetch_optional(&mut *tx)
        .await?;

        let (student_id,) = confirmed
            .ok_or_else(|| ApiError::conflict("Invalid or already used re-enrollment link"))?;

        sqlx::query("UPDATE students SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(student_id)
            .bind(StudentStatus::Active)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%student_id, "re-enrollment confirmed");

        Ok(())
    }
}

fn map_student_fk(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
            ApiError::NotFound("Student")
        }
        _ => ApiError::Database(err),
    }
}
