use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::errors::ApiError;
use crate::models::{TechniqueEntry, TechniqueQuery, UpsertTechnique};
use crate::services::TechniqueService;

#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TechniqueQuery>,
) -> Result<Json<Vec<TechniqueEntry>>, ApiError> {
    let entries = TechniqueService::new(state.db.clone()).list(query).await?;
    Ok(Json(entries))
}

#[tracing::instrument(skip(state))]
pub async fn kinds(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(TechniqueService::new(state.db.clone()).kinds().to_vec())
}

#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<TechniqueEntry>, ApiError> {
    let entry = TechniqueService::new(state.db.clone()).get(entry_id).await?;
    Ok(Json(entry))
}

#[tracing::instrument(skip(state, record))]
pub async fn create(
    State(state): State<AppState>,
    Json(record): Json<UpsertTechnique>,
) -> Result<(StatusCode, Json<TechniqueEntry>), ApiError> {
    let entry = TechniqueService::new(state.db.clone()).create(record).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[tracing::instrument(skip(state, record))]
pub async fn update(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(record): Json<UpsertTechnique>,
) -> Result<Json<TechniqueEntry>, ApiError> {
    let entry = TechniqueService::new(state.db.clone())
        .update(entry_id, record)
        .await?;
    Ok(Json(entry))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    TechniqueService::new(state.db.clone()).delete(entry_id).await?;
    Ok(Json(json!({ "success": true })))
}
