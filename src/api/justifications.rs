use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::auth::UserSession;
use crate::errors::ApiError;
use crate::models::{
    AbsenceJustification, CreateJustification, JustificationQuery, JustificationWithStudent,
    ReviewJustification,
};
use crate::services::JustificationService;

#[tracing::instrument(skip(state, session))]
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<JustificationQuery>,
) -> Result<Json<Vec<JustificationWithStudent>>, ApiError> {
    let justifications = JustificationService::new(state.db.clone())
        .list(&session, query)
        .await?;
    Ok(Json(justifications))
}

/// File an absence justification.
#[tracing::instrument(skip(state, session, request))]
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateJustification>,
) -> Result<(StatusCode, Json<AbsenceJustification>), ApiError> {
    let justification = JustificationService::new(state.db.clone())
        .create(&session, request)
        .await?;
    Ok((StatusCode::CREATED, Json(justification)))
}

#[tracing::instrument(skip(state, request))]
pub async fn review(
    State(state): State<AppState>,
    Path(justification_id): Path<Uuid>,
    Json(request): Json<ReviewJustification>,
) -> Result<Json<AbsenceJustification>, ApiError> {
    let justification = JustificationService::new(state.db.clone())
        .review(justification_id, request)
        .await?;
    Ok(Json(justification))
}

#[tracing::instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(justification_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    JustificationService::new(state.db.clone())
        .mark_read(justification_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}
