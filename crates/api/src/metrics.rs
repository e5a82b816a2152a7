use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use crate::db::measurements::{self, MeasurementData};

/// Strict `YYYY-mm-dd`, the only date encoding the measurement table uses.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Measurement table has no rows")]
    EmptyDataset,
    #[error("Malformed date in measurement table: {0}")]
    MalformedDate(#[from] time::error::Parse),
    #[error("Failed to format date: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error(transparent)]
    Store(#[from] measurements::Error),
}

/// Values derived from the full measurement history once at startup and
/// carried, immutable, in the application state for the process lifetime.
/// A long-running server deliberately does not see rows inserted after
/// startup.
#[derive(Debug, Clone)]
pub struct DerivedMetrics {
    pub most_recent_date: Date,
    pub one_year_ago: Date,
    pub most_active_station: String,
    cutoff: String,
}

impl DerivedMetrics {
    /// Read the measurement history and compute the three derived values.
    ///
    /// Fails when the table is empty or its maximum date does not parse as
    /// strict `YYYY-mm-dd`; both are fatal at startup.
    pub async fn compute(store: &dyn MeasurementData) -> Result<Self, Error> {
        let raw = store
            .most_recent_date()
            .await?
            .ok_or(Error::EmptyDataset)?;
        let most_recent_date = Date::parse(&raw, DATE_FORMAT)?;

        let one_year_ago = one_year_before(most_recent_date);
        let cutoff = one_year_ago.format(DATE_FORMAT)?;

        let most_active_station = store
            .most_active_station()
            .await?
            .ok_or(Error::EmptyDataset)?;

        Ok(Self {
            most_recent_date,
            one_year_ago,
            most_active_station,
            cutoff,
        })
    }

    /// The one-year-ago date preformatted for string comparison against the
    /// TEXT date column.
    pub fn cutoff(&self) -> &str {
        &self.cutoff
    }
}

/// Calendar-aware one-year subtraction: year decremented, month and day
/// preserved. Feb 29 falls back to Feb 28 when the target year is not a
/// leap year.
pub fn one_year_before(date: Date) -> Date {
    let year = date.year() - 1;
    match Date::from_calendar_date(year, date.month(), date.day()) {
        Ok(d) => d,
        Err(_) => Date::from_calendar_date(year, date.month(), 28)
            .expect("day 28 exists in every month"),
    }
}
