pub mod measurements;
pub mod sqlite;

pub use measurements::{MeasurementData, MeasurementStore, TemperatureSummary};
pub use sqlite::Database;
