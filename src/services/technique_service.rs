use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{TechniqueEntry, TechniqueQuery, UpsertTechnique, TECHNIQUE_KINDS};

const TECHNIQUE_COLUMNS: &str = "id, title, technique_kind, min_rank, modality, video_url, \
     photo_url, instructions, description, created_at, updated_at";

#[derive(Clone)]
pub struct TechniqueService {
    db: PgPool,
}

impl TechniqueService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self, query: TechniqueQuery) -> Result<Vec<TechniqueEntry>, ApiError> {
        let mut sql = format!("SELECT {TECHNIQUE_COLUMNS} FROM technique_library WHERE 1=1");
        let mut params: Vec<String> = Vec::new();

        if let Some(min_rank) = query.min_rank {
            params.push(min_rank);
            sql.push_str(&format!(
                " AND (min_rank IS NULL OR min_rank = ${})",
                params.len()
            ));
        }
        if let Some(modality) = query.modality {
            params.push(modality);
            sql.push_str(&format!(
                " AND (modality IS NULL OR modality = ${})",
                params.len()
            ));
        }
        if let Some(kind) = query.technique_kind {
            params.push(kind);
            sql.push_str(&format!(" AND technique_kind = ${}", params.len()));
        }

        sql.push_str(" ORDER BY created_at DESC");

        let mut query_builder = sqlx::query_as::<_, TechniqueEntry>(&sql);
        for param in &params {
            query_builder = query_builder.bind(param);
        }

        Ok(query_builder.fetch_all(&self.db).await?)
    }

    pub async fn get(&self, entry_id: Uuid) -> Result<TechniqueEntry, ApiError> {
        sqlx::query_as::<_, TechniqueEntry>(&format!(
            "SELECT {TECHNIQUE_COLUMNS} FROM technique_library WHERE id = $1"
        ))
        .bind(entry_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Technique"))
    }

    pub async fn create(&self, record: UpsertTechnique) -> Result<TechniqueEntry, ApiError> {
        if record.title.trim().is_empty() {
            return Err(ApiError::validation("Title cannot be empty"));
        }

        Ok(sqlx::query_as::<_, TechniqueEntry>(&format!(
            "INSERT INTO technique_library (title, technique_kind, min_rank, modality, \
             video_url, photo_url, instructions, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TECHNIQUE_COLUMNS}"
        ))
        .bind(record.title.trim())
        .bind(&record.technique_kind)
        .bind(&record.min_rank)
        .bind(&record.modality)
        .bind(&record.video_url)
        .bind(&record.photo_url)
        .bind(&record.instructions)
        .bind(&record.description)
        .fetch_one(&self.db)
        .await?)
    }

    pub async fn update(
        &self,
        entry_id: Uuid,
        record: UpsertTechnique,
    ) -> Result<TechniqueEntry, ApiError> {
        sqlx::query_as::<_, TechniqueEntry>(&format!(
            "UPDATE technique_library SET title = $2, technique_kind = $3, min_rank = $4, \
             modality = $5, video_url = $6, photo_url = $7, instructions = $8, \
             description = $9, updated_at = NOW()
             WHERE id = $1
             RETURNING {TECHNIQUE_COLUMNS}"
        ))
        .bind(entry_id)
        .bind(record.title.trim())
        .bind(&record.technique_kind)
        .bind(&record.min_rank)
        .bind(&record.modality)
        .bind(&record.video_url)
        .bind(&record.photo_url)
        .bind(&record.instructions)
        .bind(&record.description)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("Technique"))
    }

    pub async fn delete(&self, entry_id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM technique_library WHERE id = $1")
            .bind(entry_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Technique"));
        }

        Ok(())
    }

    pub fn kinds(&self) -> &'static [&'static str] {
        &TECHNIQUE_KINDS
    }
}
