use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::internal_error;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Distinct station identifiers appearing in the measurement table", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the measurement store")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let station_ids = state.store.station_ids().await.map_err(internal_error)?;

    Ok(Json(station_ids))
}
