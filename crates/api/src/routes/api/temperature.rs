use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::internal_error;
use crate::{db::measurements::TemperatureSummary, AppState};

/// The wire shape both temperature routes share: a one-element array holding
/// `[tmin, tavg, tmax]`. An empty window yields `[[null, null, null]]`, not
/// an empty array.
fn summary_response(summary: TemperatureSummary) -> Json<Vec<[Option<f64>; 3]>> {
    Json(vec![[summary.tmin, summary.tavg, summary.tmax]])
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "Start date (YYYY-mm-dd), compared as a raw string; never validated"),
    ),
    responses(
        (status = OK, description = "One [tmin, tavg, tmax] triple over all rows with date >= start", body = Object),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the measurement store")
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<[Option<f64>; 3]>>, (StatusCode, String)> {
    let summary = state
        .store
        .temperature_summary_from(&start)
        .await
        .map_err(internal_error)?;

    Ok(summary_response(summary))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "Start date (YYYY-mm-dd), compared as a raw string; never validated"),
        ("end" = String, Path, description = "End date (YYYY-mm-dd, inclusive), compared as a raw string; never validated"),
    ),
    responses(
        (status = OK, description = "One [tmin, tavg, tmax] triple over all rows with start <= date <= end", body = Object),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the measurement store")
    ))]
pub async fn temperature_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<[Option<f64>; 3]>>, (StatusCode, String)> {
    let summary = state
        .store
        .temperature_summary_between(&start, &end)
        .await
        .map_err(internal_error)?;

    Ok(summary_response(summary))
}
