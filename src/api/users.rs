use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::auth::UserSession;
use crate::errors::ApiError;
use crate::models::{CreateUser, Student, UpdateUser, UserWithStudent};
use crate::services::UserService;

#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserWithStudent>>, ApiError> {
    let users = UserService::new(state.db.clone()).list().await?;
    Ok(Json(users))
}

#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserWithStudent>, ApiError> {
    let user = UserService::new(state.db.clone()).get(user_id).await?;
    Ok(Json(user))
}

#[tracing::instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserWithStudent>), ApiError> {
    let user = UserService::new(state.db.clone()).create(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[tracing::instrument(skip(state, request))]
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    UserService::new(state.db.clone()).update(user_id, request).await?;
    Ok(Json(json!({ "success": true })))
}

#[tracing::instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    UserService::new(state.db.clone())
        .delete(session.user_id, user_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// Active students without a login, for the account creation form.
#[tracing::instrument(skip(state))]
pub async fn students_without_login(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = UserService::new(state.db.clone())
        .students_without_login()
        .await?;
    Ok(Json(students))
}
