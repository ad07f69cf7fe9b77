use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::json;

use crate::api::routes::AppState;
use crate::errors::ApiError;
use crate::models::{ConfirmReEnrollment, GenerateReEnrollment, ReEnrollmentDetails, ReEnrollmentLink};
use crate::services::ReEnrollmentService;

/// Issue a re-enrollment link for a student (admin).
#[tracing::instrument(skip(state, request))]
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateReEnrollment>,
) -> Result<(StatusCode, Json<ReEnrollmentLink>), ApiError> {
    let link = ReEnrollmentService::new(state.db.clone()).generate(request).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Public: pending token details for the confirmation page. The token is
/// a credential and stays out of the logs.
#[tracing::instrument(skip(state, token))]
pub async fn get_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ReEnrollmentDetails>, ApiError> {
    let details = ReEnrollmentService::new(state.db.clone())
        .get_by_token(&token)
        .await?;
    Ok(Json(details))
}

/// Public: confirm a re-enrollment. Single-use per token.
#[tracing::instrument(skip(state, request))]
pub async fn confirm(
    State(state): State<AppState>,
    Json(request): Json<ConfirmReEnrollment>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ReEnrollmentService::new(state.db.clone())
        .confirm(&request.token)
        .await?;
    Ok(Json(json!({ "success": true })))
}
