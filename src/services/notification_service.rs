use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{NewNotification, Notification, UnreadCount};

#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

impl NotificationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Persist a notification for a user. The sink is write-only for the
    /// flows that feed it: a failed insert is logged and swallowed so it
    /// never rolls back the operation that triggered it.
    pub async fn create(&self, notification: NewNotification) {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, student_id, kind, title, message, link)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(notification.user_id)
        .bind(notification.student_id)
        .bind(&notification.kind)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.link)
        .execute(&self.db)
        .await;

        if let Err(err) = result {
            tracing::warn!(error = %err, kind = %notification.kind, "failed to persist notification");
        }
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, ApiError> {
        let mut sql = String::from(
            "SELECT id, user_id, student_id, kind, title, message, read, link, created_at
             FROM notifications WHERE user_id = $1",
        );
        if unread_only {
            sql.push_str(" AND NOT read");
        }
        sql.push_str(" ORDER BY created_at DESC LIMIT 50");

        Ok(sqlx::query_as::<_, Notification>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<UnreadCount, ApiError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT read",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(UnreadCount { total })
    }

    /// Mark one of the caller's notifications as read. Someone else's
    /// notification is indistinguishable from a missing one.
    pub async fn mark_read(&self, user_id: Uuid, notification_id: Uuid) -> Result<(), ApiError> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(notification_id)
                .bind(user_id)
                .execute(&self.db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Notification"));
        }

        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<(), ApiError> {
        sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND NOT read")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
