use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::errors::ApiError;
use crate::models::{Announcement, CreateAnnouncement};
use crate::services::AnnouncementService;

#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>, ApiError> {
    let announcements = AnnouncementService::new(state.db.clone()).list().await?;
    Ok(Json(announcements))
}

#[tracing::instrument(skip(state, record))]
pub async fn create(
    State(state): State<AppState>,
    Json(record): Json<CreateAnnouncement>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    let announcement = AnnouncementService::new(state.db.clone()).create(record).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(announcement_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    AnnouncementService::new(state.db.clone())
        .delete(announcement_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}
