use anyhow::{Context, Result};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{collections::HashSet, str::FromStr, time::Duration};

/// The two tables this service reads. The schema is owned by whatever
/// produced the database file; we only verify at startup that the columns
/// we query are actually there instead of discovering them at runtime.
const EXPECTED_SCHEMA: &[(&str, &[&str])] = &[
    ("measurement", &["id", "station", "date", "prcp", "tobs"]),
    (
        "station",
        &["id", "station", "name", "latitude", "longitude", "elevation"],
    ),
];

/// Read-only handle to the pre-populated measurement database.
///
/// The pool hands out one short-lived connection per request; sqlx returns
/// it to the pool when the checkout is dropped, on every exit path.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .pragma("query_only", "ON")
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to create database connection pool")?;

        let db = Self { pool };
        db.verify_schema().await?;
        info!("SQLite database opened read-only at: {}", path);

        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database connectivity and integrity.
    pub async fn health_check(&self) -> Result<()> {
        // Basic connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;

        // Page structure integrity
        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await
            .context("Database integrity check failed")?;
        if result != "ok" {
            return Err(anyhow::anyhow!(
                "Database integrity check failed: {}",
                result
            ));
        }

        Ok(())
    }

    /// Verify the statically declared schema against the store.
    ///
    /// A missing table shows up as an empty column list from
    /// `pragma_table_info`, so both cases fail with the same shape of error.
    async fn verify_schema(&self) -> Result<()> {
        for (table, columns) in EXPECTED_SCHEMA {
            let found: HashSet<String> = sqlx::query_scalar(&format!(
                "SELECT name FROM pragma_table_info('{}')",
                table
            ))
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to read schema for table '{}'", table))?
            .into_iter()
            .collect();

            if found.is_empty() {
                return Err(anyhow::anyhow!("Missing table '{}' in database", table));
            }

            for column in *columns {
                if !found.contains(*column) {
                    return Err(anyhow::anyhow!(
                        "Table '{}' is missing expected column '{}'",
                        table,
                        column
                    ));
                }
            }
        }

        Ok(())
    }
}
