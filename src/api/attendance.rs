use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::api::routes::AppState;
use crate::auth::UserSession;
use crate::errors::ApiError;
use crate::models::{
    AttendanceQuery, AttendanceRecord, AttendanceWithStudent, RecordAttendance, RosterEntry,
};
use crate::services::AttendanceService;

#[tracing::instrument(skip(state, session))]
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceWithStudent>>, ApiError> {
    let records = AttendanceService::new(state.db.clone())
        .list(&session, query)
        .await?;
    Ok(Json(records))
}

/// Record presence for a student on a given day (upsert).
#[tracing::instrument(skip(state, entry))]
pub async fn record(
    State(state): State<AppState>,
    Json(entry): Json<RecordAttendance>,
) -> Result<(StatusCode, Json<AttendanceRecord>), ApiError> {
    let record = AttendanceService::new(state.db.clone()).record(entry).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub date: Option<NaiveDate>,
}

/// Daily roster: active students plus any record for the chosen date.
#[tracing::instrument(skip(state))]
pub async fn roster(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<Vec<RosterEntry>>, ApiError> {
    let date = query.date.unwrap_or(Utc::now().date_naive());
    let roster = AttendanceService::new(state.db.clone()).roster(date).await?;
    Ok(Json(roster))
}
