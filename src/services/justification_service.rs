use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{UserRole, UserSession};
use crate::domain::access;
use crate::errors::ApiError;
use crate::models::{
    AbsenceJustification, CreateJustification, JustificationQuery, JustificationStatus,
    JustificationWithStudent, NewNotification, ReviewJustification,
};
use crate::services::NotificationService;

const JUSTIFICATION_COLUMNS: &str =
    "id, student_id, absence_date, justification, status, read, resolved, reviewer_note, \
     created_at";

#[derive(Clone)]
pub struct JustificationService {
    db: PgPool,
}

impl JustificationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        session: &UserSession,
        query: JustificationQuery,
    ) -> Result<Vec<JustificationWithStudent>, ApiError> {
        let mut sql = String::from(
            "SELECT j.id, j.student_id, j.absence_date, j.justification, j.status, j.read, \
             j.resolved, j.reviewer_note, j.created_at, s.full_name
             FROM absence_justifications j JOIN students s ON j.student_id = s.id WHERE 1=1",
        );
        let mut student_filter: Option<Uuid> = None;

        match session.role {
            UserRole::Student => {
                student_filter = Some(session.student_id.ok_or(ApiError::Forbidden)?);
            }
            UserRole::Admin => {
                student_filter = query.student_id;
            }
            UserRole::Guest => return Err(ApiError::Forbidden),
        }

        let mut param_count = 0;
        if student_filter.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND j.student_id = ${param_count}"));
        }
        if query.status.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND j.status = ${param_count}"));
        }
        sql.push_str(" ORDER BY j.absence_date DESC, j.created_at DESC");

        let mut query_builder = sqlx::query_as::<_, JustificationWithStudent>(&sql);
        if let Some(student_id) = student_filter {
            query_builder = query_builder.bind(student_id);
        }
        if let Some(status) = query.status {
            query_builder = query_builder.bind(status);
        }

        Ok(query_builder.fetch_all(&self.db).await?)
    }

    /// File an absence justification. Students file for their own linked
    /// student; admins for whichever student the request names. Every
    /// admin account gets a notification.
    pub async fn create(
        &self,
        session: &UserSession,
        request: CreateJustification,
    ) -> Result<AbsenceJustification, ApiError> {
        let student_id =
            access::justification_target(session.role, session.student_id, request.student_id)
                .ok_or_else(|| match session.role {
                    UserRole::Admin => ApiError::validation("student_id is required"),
                    _ => ApiError::Forbidden,
                })?;

        if request.justification.trim().is_empty() {
            return Err(ApiError::validation("Justification text cannot be empty"));
        }

        let justification = sqlx::query_as::<_, AbsenceJustification>(&format!(
            "INSERT INTO absence_justifications (student_id, absence_date, justification, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {JUSTIFICATION_COLUMNS}"
        ))
        .bind(student_id)
        .bind(request.absence_date)
        .bind(request.justification.trim())
        .bind(JustificationStatus::Pending)
        .fetch_one(&self.db)
        .await
        .map_err(map_student_fk)?;

        self.notify_admins(student_id).await?;

        Ok(justification)
    }

    /// Admin review: status, read/resolved flags and the reviewer note.
    pub async fn review(
        &self,
        justification_id: Uuid,
        request: ReviewJustification,
    ) -> Result<AbsenceJustification, ApiError> {
        let justification = sqlx::query_as::<_, AbsenceJustification>(&format!(
            "UPDATE absence_justifications SET
                 status = COALESCE($2, status),
                 read = COALESCE($3, read),
                 resolved = COALESCE($4, resolved),
                 reviewer_note = COALESCE($5, reviewer_note)
             WHERE id = $1
             RETURNING {JUSTIFICATION_COLUMNS}"
        ))
        .bind(justification_id)
        .bind(request.status)
        .bind(request.read)
        .bind(request.resolved)
        .bind(&request.reviewer_note)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Justification"))?;

        Ok(justification)
    }

    pub async fn mark_read(&self, justification_id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE absence_justifications SET read = TRUE WHERE id = $1")
            .bind(justification_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Justification"));
        }

        Ok(())
    }

    async fn notify_admins(&self, student_id: Uuid) -> Result<(), ApiError> {
        let student_name: Option<(String,)> =
            sqlx::query_as("SELECT full_name FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(&self.db)
                .await?;
        let name = student_name
            .map(|(n,)| n)
            .unwrap_or_else(|| "A student".to_string());

        let admins: Vec<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE role = $1")
                .bind(UserRole::Admin)
                .fetch_all(&self.db)
                .await?;

        let notifications = NotificationService::new(self.db.clone());
        for (admin_id,) in admins {
            notifications
                .create(NewNotification {
                    user_id: admin_id,
                    student_id: Some(student_id),
                    kind: "absence_justification".to_string(),
                    title: "New absence justification".to_string(),
                    message: format!("{name} justified an absence."),
                    link: Some("/justifications".to_string()),
                })
                .await;
        }

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
