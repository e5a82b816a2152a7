use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::internal_error;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations for the most active station over the last year of data, as [date, tobs] pairs", body = Object),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the measurement store")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<(String, f64)>>, (StatusCode, String)> {
    let readings = state
        .store
        .temperatures_since(&state.metrics.most_active_station, state.metrics.cutoff())
        .await
        .map_err(internal_error)?;

    Ok(Json(readings))
}
