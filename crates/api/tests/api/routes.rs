use crate::helpers::{
    expect_startup_queries, spawn_app, MockMeasurementAccess, CUTOFF, MOST_ACTIVE_STATION,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use hawaii_climate_api::{db::measurements::Error, TemperatureSummary};
use hyper::Method;
use serde_json::{from_slice, json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn home_lists_the_data_routes() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = get(&test_app.app, "/").await;
    assert!(status.is_success());

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("/api/v1.0/precipitation"));
    assert!(text.contains("/api/v1.0/stations"));
    assert!(text.contains("/api/v1.0/tobs"));
    assert!(text.contains("YYYY-mm-dd"));
}

#[tokio::test]
async fn precipitation_maps_last_year_with_last_write_wins() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    store
        .expect_precipitation_since()
        .withf(|cutoff| cutoff == CUTOFF)
        .times(1)
        .returning(|_| {
            Ok(vec![
                ("2016-08-24".to_string(), Some(0.08)),
                ("2016-08-24".to_string(), Some(2.15)),
                ("2016-08-25".to_string(), None),
            ])
        });

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = get(&test_app.app, "/api/v1.0/precipitation").await;
    assert!(status.is_success());

    let parsed: Value = from_slice(&body).unwrap();
    // Two rows share 2016-08-24; the later one wins
    assert_eq!(parsed, json!({ "2016-08-24": 2.15, "2016-08-25": null }));
}

#[tokio::test]
async fn stations_returns_each_station_once() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    store.expect_station_ids().times(1).returning(|| {
        Ok(vec![
            "USC00511918".to_string(),
            "USC00513117".to_string(),
            "USC00519281".to_string(),
        ])
    });

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = get(&test_app.app, "/api/v1.0/stations").await;
    assert!(status.is_success());

    let parsed: Value = from_slice(&body).unwrap();
    assert_eq!(
        parsed,
        json!(["USC00511918", "USC00513117", "USC00519281"])
    );
}

#[tokio::test]
async fn tobs_queries_the_most_active_station_over_the_last_year() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    store
        .expect_temperatures_since()
        .withf(|station, cutoff| station == MOST_ACTIVE_STATION && cutoff == CUTOFF)
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                ("2016-08-24".to_string(), 77.0),
                ("2016-08-25".to_string(), 80.0),
            ])
        });

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = get(&test_app.app, "/api/v1.0/tobs").await;
    assert!(status.is_success());

    let parsed: Value = from_slice(&body).unwrap();
    assert_eq!(parsed, json!([["2016-08-24", 77.0], ["2016-08-25", 80.0]]));
}

#[tokio::test]
async fn temperature_from_start_returns_single_triple() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    store
        .expect_temperature_summary_from()
        .withf(|start| start == "2017-01-01")
        .times(1)
        .returning(|_| {
            Ok(TemperatureSummary {
                tmin: Some(58.0),
                tavg: Some(74.5),
                tmax: Some(87.0),
            })
        });

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = get(&test_app.app, "/api/v1.0/2017-01-01").await;
    assert!(status.is_success());

    let parsed: Value = from_slice(&body).unwrap();
    assert_eq!(parsed, json!([[58.0, 74.5, 87.0]]));
}

#[tokio::test]
async fn temperature_range_bounds_both_ends() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    store
        .expect_temperature_summary_between()
        .withf(|start, end| start == "2017-01-01" && end == "2017-01-07")
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                tmin: Some(62.0),
                tavg: Some(69.0),
                tmax: Some(74.0),
            })
        });

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = get(&test_app.app, "/api/v1.0/2017-01-01/2017-01-07").await;
    assert!(status.is_success());

    let parsed: Value = from_slice(&body).unwrap();
    assert_eq!(parsed, json!([[62.0, 69.0, 74.0]]));
}

#[tokio::test]
async fn empty_window_returns_one_null_triple() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    // A nonsense start segment is never rejected; the query just matches
    // nothing and the aggregates come back NULL
    store
        .expect_temperature_summary_from()
        .withf(|start| start == "not-a-date")
        .times(1)
        .returning(|_| {
            Ok(TemperatureSummary {
                tmin: None,
                tavg: None,
                tmax: None,
            })
        });

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = get(&test_app.app, "/api/v1.0/not-a-date").await;
    assert!(status.is_success());

    let parsed: Value = from_slice(&body).unwrap();
    assert_eq!(parsed, json!([[null, null, null]]));
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn fixed_routes_win_over_the_start_capture() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    // "stations" must never be treated as a start date
    store
        .expect_station_ids()
        .times(1)
        .returning(|| Ok(vec!["USC00519281".to_string()]));
    store.expect_temperature_summary_from().never();

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, _) = get(&test_app.app, "/api/v1.0/stations").await;
    assert!(status.is_success());
}

#[tokio::test]
async fn repeated_requests_return_byte_identical_bodies() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    store.expect_precipitation_since().times(2).returning(|_| {
        Ok(vec![
            ("2016-09-01".to_string(), Some(0.02)),
            ("2016-09-02".to_string(), None),
            ("2016-09-01".to_string(), Some(0.45)),
        ])
    });

    let test_app = spawn_app(Arc::new(store)).await;

    let (_, first) = get(&test_app.app, "/api/v1.0/precipitation").await;
    let (_, second) = get(&test_app.app, "/api/v1.0/precipitation").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn store_failure_surfaces_as_500() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    store
        .expect_station_ids()
        .times(1)
        .returning(|| Err(Error::Query(sqlx::Error::RowNotFound)));

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, _) = get(&test_app.app, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_routes_return_404() {
    let mut store = MockMeasurementAccess::new();
    expect_startup_queries(&mut store);
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, _) = get(&test_app.app, "/api/v2.0/precipitation").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
