use axum::{extract::State, http::StatusCode, Json};
use std::{collections::BTreeMap, sync::Arc};

use super::internal_error;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Mapping from date to precipitation (inches, null when not recorded) for the last year of data", body = Object),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the measurement store")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, (StatusCode, String)> {
    let rows = state
        .store
        .precipitation_since(state.metrics.cutoff())
        .await
        .map_err(internal_error)?;

    // Stations report independently, so a date can appear several times;
    // the later row in query order wins. BTreeMap keeps the key order
    // stable across identical requests.
    let mut readings = BTreeMap::new();
    for (date, prcp) in rows {
        readings.insert(date, prcp);
    }

    Ok(Json(readings))
}
