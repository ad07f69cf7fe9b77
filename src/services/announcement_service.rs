use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{Announcement, CreateAnnouncement};

#[derive(Clone)]
pub struct AnnouncementService {
    db: PgPool,
}

impl AnnouncementService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// The ten most recent announcements.
    pub async fn list(&self) -> Result<Vec<Announcement>, ApiError> {
        Ok(sqlx::query_as::<_, Announcement>(
            "SELECT id, title, body, published_on, created_at
             FROM announcements ORDER BY published_on DESC LIMIT 10",
        )
        .fetch_all(&self.db)
        .await?)
    }

    pub async fn create(&self, record: CreateAnnouncement) -> Result<Announcement, ApiError> {
        if record.title.trim().is_empty() {
            return Err(ApiError::validation("Title cannot be empty"));
        }

        Ok(sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (title, body, published_on)
             VALUES ($1, $2, $3)
             RETURNING id, title, body, published_on, created_at",
        )
        .bind(record.title.trim())
        .bind(&record.body)
        .bind(record.published_on.unwrap_or(Utc::now().date_naive()))
        .fetch_one(&self.db)
        .await?)
    }

    pub async fn delete(&self, announcement_id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(announcement_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Announcement"));
        }

        Ok(())
    }
}
