use axum::{
    extract::{Request, State},
    response::Json,
};

use crate::api::routes::AppState;
use crate::auth::{AuthCheck, AuthError, LoginRequest, LoginResponse, MessageResponse};

/// Login user
#[tracing::instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let response = state.auth.login(request).await?;
    Ok(Json(response))
}

/// Logout user
#[tracing::instrument(skip(state, request))]
pub async fn logout(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<MessageResponse>, AuthError> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = crate::auth::extract_bearer_token(auth_header)?;
    let response = state.auth.logout(token).await?;
    Ok(Json(response))
}

/// Report whether the caller holds a valid session
#[tracing::instrument(skip(state, request))]
pub async fn check(State(state): State<AppState>, request: Request) -> Json<AuthCheck> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    match state.auth.session_from_header(auth_header).await {
        Some(session) => Json(AuthCheck {
            authenticated: true,
            role: Some(session.role),
            name: Some(session.username),
        }),
        None => Json(AuthCheck {
            authenticated: false,
            role: None,
            name: None,
        }),
    }
}
