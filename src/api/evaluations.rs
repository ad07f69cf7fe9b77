use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::auth::UserSession;
use crate::errors::ApiError;
use crate::models::{
    CreateEvaluation, Evaluation, EvaluationQuery, EvaluationWithStudent, UpdateEvaluation,
};
use crate::services::EvaluationService;

#[tracing::instrument(skip(state, session))]
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<EvaluationQuery>,
) -> Result<Json<Vec<EvaluationWithStudent>>, ApiError> {
    let evaluations = EvaluationService::new(state.db.clone())
        .list(&session, query)
        .await?;
    Ok(Json(evaluations))
}

#[tracing::instrument(skip(state, session))]
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(evaluation_id): Path<Uuid>,
) -> Result<Json<EvaluationWithStudent>, ApiError> {
    let evaluation = EvaluationService::new(state.db.clone())
        .get(&session, evaluation_id)
        .await?;
    Ok(Json(evaluation))
}

#[tracing::instrument(skip(state, record))]
pub async fn create(
    State(state): State<AppState>,
    Json(record): Json<CreateEvaluation>,
) -> Result<(StatusCode, Json<Evaluation>), ApiError> {
    let evaluation = EvaluationService::new(state.db.clone()).create(record).await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}

#[tracing::instrument(skip(state, record))]
pub async fn update(
    State(state): State<AppState>,
    Path(evaluation_id): Path<Uuid>,
    Json(record): Json<UpdateEvaluation>,
) -> Result<Json<Evaluation>, ApiError> {
    let evaluation = EvaluationService::new(state.db.clone())
        .update(evaluation_id, record)
        .await?;
    Ok(Json(evaluation))
}

/// Release an evaluation to its student.
#[tracing::instrument(skip(state))]
pub async fn release(
    State(state): State<AppState>,
    Path(evaluation_id): Path<Uuid>,
) -> Result<Json<Evaluation>, ApiError> {
    let evaluation = EvaluationService::new(state.db.clone())
        .release(evaluation_id)
        .await?;
    Ok(Json(evaluation))
}
