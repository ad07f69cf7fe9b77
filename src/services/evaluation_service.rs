use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{UserRole, UserSession};
use crate::domain::access;
use crate::errors::ApiError;
use crate::models::{
    CreateEvaluation, Evaluation, EvaluationQuery, EvaluationStatus, EvaluationWithStudent,
    NewNotification, UpdateEvaluation,
};
use crate::services::NotificationService;

const EVALUATION_COLUMNS: &str = "id, student_id, evaluation_date, discipline, technique, \
     participation, conduct, notes, status, released_on, created_at, updated_at";

#[derive(Clone)]
pub struct EvaluationService {
    db: PgPool,
}

impl EvaluationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List evaluations under the visibility rules: students get their own
    /// released evaluations only; admins get everything, optionally
    /// filtered by student.
    pub async fn list(
        &self,
        session: &UserSession,
        query: EvaluationQuery,
    ) -> Result<Vec<EvaluationWithStudent>, ApiError> {
        let mut sql = format!(
            "SELECT av.id, av.student_id, av.evaluation_date, av.discipline, av.technique, \
             av.participation, av.conduct, av.notes, av.status, av.released_on, av.created_at, \
             av.updated_at, s.full_name, NULL::float8 AS average
             FROM evaluations av JOIN students s ON av.student_id = s.id WHERE 1=1"
        );

        let evaluations = match session.role {
            UserRole::Student => {
                let own = session.student_id.ok_or(ApiError::Forbidden)?;
                sql.push_str(" AND av.student_id = $1 AND av.status = $2");
                sql.push_str(" ORDER BY av.evaluation_date DESC");
                sqlx::query_as::<_, EvaluationWithStudent>(&sql)
                    .bind(own)
                    .bind(EvaluationStatus::Released)
                    .fetch_all(&self.db)
                    .await?
            }
            UserRole::Admin => {
                if let Some(student_id) = query.student_id {
                    sql.push_str(" AND av.student_id = $1");
                    sql.push_str(" ORDER BY av.evaluation_date DESC");
                    sqlx::query_as::<_, EvaluationWithStudent>(&sql)
                        .bind(student_id)
                        .fetch_all(&self.db)
                        .await?
                } else {
                    sql.push_str(" ORDER BY av.evaluation_date DESC");
                    sqlx::query_as::<_, EvaluationWithStudent>(&sql)
                        .fetch_all(&self.db)
                        .await?
                }
            }
            UserRole::Guest => return Err(ApiError::Forbidden),
        };

        Ok(evaluations
            .into_iter()
            .map(EvaluationWithStudent::with_average)
            .collect())
    }

    pub async fn get(
        &self,
        session: &UserSession,
        evaluation_id: Uuid,
    ) -> Result<EvaluationWithStudent, ApiError> {
        let evaluation = sqlx::query_as::<_, EvaluationWithStudent>(
            "SELECT av.id, av.student_id, av.evaluation_date, av.discipline, av.technique, \
             av.participation, av.conduct, av.notes, av.status, av.released_on, av.created_at, \
             av.updated_at, s.full_name, NULL::float8 AS average
             FROM evaluations av JOIN students s ON av.student_id = s.id WHERE av.id = $1",
        )
        .bind(evaluation_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Evaluation"))?;

        if !access::evaluation_visible(
            session.role,
            session.student_id,
            evaluation.student_id,
            evaluation.status,
        ) {
            return Err(ApiError::Forbidden);
        }

        Ok(evaluation.with_average())
    }

    pub async fn create(&self, record: CreateEvaluation) -> Result<Evaluation, ApiError> {
        let evaluation = sqlx::query_as::<_, Evaluation>(&format!(
            "INSERT INTO evaluations (student_id, evaluation_date, discipline, technique, \
             participation, conduct, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {EVALUATION_COLUMNS}"
        ))
        .bind(record.student_id)
        .bind(record.evaluation_date)
        .bind(record.discipline)
        .bind(record.technique)
        .bind(record.participation)
        .bind(record.conduct)
        .bind(&record.notes)
        .bind(record.status.unwrap_or(EvaluationStatus::Draft))
        .fetch_one(&self.db)
        .await
        .map_err(map_student_fk)?;

        Ok(evaluation)
    }

    /// Update an evaluation. A requested move to `Released` goes through
    /// the one-time release transition; moving a released evaluation back
    /// to draft is rejected.
    pub async fn update(
        &self,
        evaluation_id: Uuid,
        record: UpdateEvaluation,
    ) -> Result<Evaluation, ApiError> {
        let current = self.fetch(evaluation_id).await?;

        match record.status {
            Some(EvaluationStatus::Draft) if current.status == EvaluationStatus::Released => {
                return Err(ApiError::validation(
                    "Released evaluations cannot return to draft",
                ));
            }
            Some(EvaluationStatus::Released) => {
                self.transition_to_released(evaluation_id).await?;
            }
            _ => {}
        }

        let evaluation = sqlx::query_as::<_, Evaluation>(&format!(
            "UPDATE evaluations SET evaluation_date = COALESCE($2, evaluation_date), \
             discipline = $3, technique = $4, participation = $5, conduct = $6, notes = $7, \
             updated_at = NOW()
             WHERE id = $1
             RETURNING {EVALUATION_COLUMNS}"
        ))
        .bind(evaluation_id)
        .bind(record.evaluation_date)
        .bind(record.discipline)
        .bind(record.technique)
        .bind(record.participation)
        .bind(record.conduct)
        .bind(&record.notes)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Evaluation"))?;

        Ok(evaluation)
    }

    /// Release an evaluation to its student. Idempotent: releasing an
    /// already-released evaluation changes nothing and notifies no one.
    pub async fn release(&self, evaluation_id: Uuid) -> Result<Evaluation, ApiError> {
        // Ensures a NotFound for unknown ids before the conditional update
        self.fetch(evaluation_id).await?;
        self.transition_to_released(evaluation_id).await?;
        self.fetch(evaluation_id).await
    }

    /// One-way `Draft` -> `Released` transition. The conditional update is
    /// the atomicity guard: zero affected rows means another request (or
    /// an earlier one) already released it, and no notification is sent.
    async fn transition_to_released(&self, evaluation_id: Uuid) -> Result<(), ApiError> {
        let released: Option<(Uuid,)> = sqlx::query_as(
            "UPDATE evaluations
             SET status = $2, released_on = $3, updated_at = NOW()
             WHERE id = $1 AND status = $4
             RETURNING student_id",
        )
        .bind(evaluation_id)
        .bind(EvaluationStatus::Released)
        .bind(Utc::now().date_naive())
        .bind(EvaluationStatus::Draft)
        .fetch_optional(&self.db)
        .await?;

        if let Some((student_id,)) = released {
            self.notify_student(student_id).await?;
        }

        Ok(())
    }

    async fn notify_student(&self, student_id: Uuid) -> Result<(), ApiError> {
        let user: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE student_id = $1")
                .bind(student_id)
                .fetch_optional(&self.db)
                .await?;

        if let Some((user_id,)) = user {
            NotificationService::new(self.db.clone())
                .create(NewNotification {
                    user_id,
                    student_id: Some(student_id),
                    kind: "evaluation_released".to_string(),
                    title: "New evaluation released".to_string(),
                    message: "A new evaluation is available for viewing.".to_string(),
                    link: Some("/evaluations".to_string()),
                })
                .await;
        }

        Ok(())
    }

    async fn fetch(&self, evaluation_id: Uuid) -> Result<Evaluation, ApiError> {
        sqlx::query_as::<_, Evaluation>(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM evaluations WHERE id = $1"
        ))
        .bind(evaluation_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Evaluation"))
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
