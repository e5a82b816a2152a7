pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use precipitation::*;
pub use stations::*;
pub use temperature::*;
pub use tobs::*;

use axum::http::StatusCode;
use log::error;

use crate::db::measurements;

/// Store failures surface as a bare 500: no retries, no partial results,
/// no structured error body.
pub(crate) fn internal_error(err: measurements::Error) -> (StatusCode, String) {
    error!("database query failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "database query failed".to_string(),
    )
}
