use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::auth::UserSession;
use crate::errors::ApiError;
use crate::models::{Notification, NotificationQuery, UnreadCount};
use crate::services::NotificationService;

#[tracing::instrument(skip(state, session))]
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = NotificationService::new(state.db.clone())
        .list_for_user(session.user_id, query.unread_only)
        .await?;
    Ok(Json(notifications))
}

#[tracing::instrument(skip(state, session))]
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UnreadCount>, ApiError> {
    let count = NotificationService::new(state.db.clone())
        .unread_count(session.user_id)
        .await?;
    Ok(Json(count))
}

#[tracing::instrument(skip(state, session))]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    NotificationService::new(state.db.clone())
        .mark_read(session.user_id, notification_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

#[tracing::instrument(skip(state, session))]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<serde_json::Value>, ApiError> {
    NotificationService::new(state.db.clone())
        .mark_all_read(session.user_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}
