use axum::{
    extract::{Query, State},
    response::Json,
    Extension,
};

use crate::api::routes::AppState;
use crate::auth::UserSession;
use crate::errors::ApiError;
use crate::models::{EvolutionPoint, EvolutionQuery, FrequencyQuery, FrequencyStat};
use crate::services::DashboardService;

#[tracing::instrument(skip(state, session))]
pub async fn frequency(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<FrequencyQuery>,
) -> Result<Json<Vec<FrequencyStat>>, ApiError> {
    let stats = DashboardService::new(state.db.clone())
        .frequency(&session, query)
        .await?;
    Ok(Json(stats))
}

#[tracing::instrument(skip(state, session))]
pub async fn evolution(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<EvolutionQuery>,
) -> Result<Json<Vec<EvolutionPoint>>, ApiError> {
    let points = DashboardService::new(state.db.clone())
        .evolution(&session, query)
        .await?;
    Ok(Json(points))
}
