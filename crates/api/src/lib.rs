pub mod db;
pub mod metrics;
pub mod routes;
pub mod startup;
pub mod utils;

pub use db::{Database, MeasurementData, MeasurementStore, TemperatureSummary};
pub use metrics::{one_year_before, DerivedMetrics};
pub use routes::*;
pub use startup::{app, build_app_state, AppState};
pub use utils::{get_config_info, get_log_level, setup_logger, Cli};
