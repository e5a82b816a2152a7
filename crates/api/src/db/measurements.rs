use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
}

/// Min/avg/max over `tobs` for a date window. All three are `None` when no
/// rows matched the window; SQLite aggregates return NULL over an empty set.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSummary {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

/// Read access to the measurement table.
///
/// Date arguments are compared as raw `YYYY-mm-dd` strings against the TEXT
/// date column, the same way the data was stored. Callers pass whatever they
/// were given; a malformed date simply matches nothing.
#[async_trait]
pub trait MeasurementData: Send + Sync {
    /// Maximum `date` value across all measurement rows, `None` if the
    /// table is empty.
    async fn most_recent_date(&self) -> Result<Option<String>, Error>;
    /// Station id with the highest measurement count. Ties break to the
    /// lexicographically smallest station id.
    async fn most_active_station(&self) -> Result<Option<String>, Error>;
    /// All `(date, prcp)` rows with `date >= cutoff`, in insertion order.
    async fn precipitation_since(&self, cutoff: &str)
        -> Result<Vec<(String, Option<f64>)>, Error>;
    /// Distinct station ids appearing in the measurement table, sorted.
    async fn station_ids(&self) -> Result<Vec<String>, Error>;
    /// All `(date, tobs)` rows for one station with `date >= cutoff`,
    /// in insertion order.
    async fn temperatures_since(
        &self,
        station: &str,
        cutoff: &str,
    ) -> Result<Vec<(String, f64)>, Error>;
    /// Aggregate `tobs` stats for `date >= start`.
    async fn temperature_summary_from(&self, start: &str) -> Result<TemperatureSummary, Error>;
    /// Aggregate `tobs` stats for `start <= date <= end` (inclusive).
    async fn temperature_summary_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureSummary, Error>;
}

/// sqlx-backed implementation over the shared read-only pool.
pub struct MeasurementStore {
    pool: SqlitePool,
}

impl MeasurementStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeasurementData for MeasurementStore {
    async fn most_recent_date(&self) -> Result<Option<String>, Error> {
        let row: (Option<String>,) = sqlx::query_as("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    async fn most_active_station(&self) -> Result<Option<String>, Error> {
        // The source data gives no ordering guarantee for equal counts;
        // `station ASC` makes the winner deterministic.
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY COUNT(*) DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.0))
    }

    async fn precipitation_since(
        &self,
        cutoff: &str,
    ) -> Result<Vec<(String, Option<f64>)>, Error> {
        let rows = sqlx::query_as(
            "SELECT date, prcp FROM measurement
             WHERE date >= ?
             ORDER BY id",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn station_ids(&self) -> Result<Vec<String>, Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY station",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn temperatures_since(
        &self,
        station: &str,
        cutoff: &str,
    ) -> Result<Vec<(String, f64)>, Error> {
        let rows = sqlx::query_as(
            "SELECT date, tobs FROM measurement
             WHERE station = ? AND date >= ?
             ORDER BY id",
        )
        .bind(station)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn temperature_summary_from(&self, start: &str) -> Result<TemperatureSummary, Error> {
        let row: (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
             WHERE date >= ?",
        )
        .bind(start)
        .fetch_one(&self.pool)
        .await?;

        Ok(TemperatureSummary {
            tmin: row.0,
            tavg: row.1,
            tmax: row.2,
        })
    }

    async fn temperature_summary_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureSummary, Error> {
        let row: (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(TemperatureSummary {
            tmin: row.0,
            tavg: row.1,
            tmax: row.2,
        })
    }
}
