use async_trait::async_trait;
use axum::Router;
use hawaii_climate_api::{
    app, db::measurements::Error, AppState, DerivedMetrics, MeasurementData, TemperatureSummary,
};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub MeasurementAccess {}

    #[async_trait]
    impl MeasurementData for MeasurementAccess {
        async fn most_recent_date(&self) -> Result<Option<String>, Error>;
        async fn most_active_station(&self) -> Result<Option<String>, Error>;
        async fn precipitation_since(
            &self,
            cutoff: &str,
        ) -> Result<Vec<(String, Option<f64>)>, Error>;
        async fn station_ids(&self) -> Result<Vec<String>, Error>;
        async fn temperatures_since(
            &self,
            station: &str,
            cutoff: &str,
        ) -> Result<Vec<(String, f64)>, Error>;
        async fn temperature_summary_from(&self, start: &str)
            -> Result<TemperatureSummary, Error>;
        async fn temperature_summary_between(
            &self,
            start: &str,
            end: &str,
        ) -> Result<TemperatureSummary, Error>;
    }
}

pub const MOST_RECENT_DATE: &str = "2017-08-23";
pub const CUTOFF: &str = "2016-08-23";
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// Set the two expectations `DerivedMetrics::compute` runs at startup.
pub fn expect_startup_queries(store: &mut MockMeasurementAccess) {
    store
        .expect_most_recent_date()
        .times(1)
        .returning(|| Ok(Some(MOST_RECENT_DATE.to_string())));
    store
        .expect_most_active_station()
        .times(1)
        .returning(|| Ok(Some(MOST_ACTIVE_STATION.to_string())));
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(store: Arc<dyn MeasurementData>) -> TestApp {
    let metrics = DerivedMetrics::compute(store.as_ref())
        .await
        .expect("Failed to compute derived metrics for test app");

    TestApp {
        app: app(AppState { store, metrics }),
    }
}
