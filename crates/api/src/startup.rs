use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    db::measurements::MeasurementStore, index, metrics::DerivedMetrics, precipitation, routes,
    stations, temperature_from, temperature_range, tobs, Database, MeasurementData,
};

/// Built once at startup and shared read-only with every handler. Nothing
/// in here is mutated after construction, so no locking is involved.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MeasurementData>,
    pub metrics: DerivedMetrics,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::home::index,
        routes::api::precipitation::precipitation,
        routes::api::stations::stations,
        routes::api::tobs::tobs,
        routes::api::temperature::temperature_from,
        routes::api::temperature::temperature_range,
    ),
    tags(
        (name = "hawaii climate api", description = "a read-only RESTful api over the Hawaii weather-station measurement history")
    )
)]
struct ApiDoc;

pub async fn build_app_state(database: &str) -> Result<AppState, anyhow::Error> {
    let db = Database::connect(database)
        .await
        .map_err(|e| anyhow!("error opening measurement database: {}", e))?;
    db.health_check().await?;

    let store: Arc<dyn MeasurementData> = Arc::new(MeasurementStore::new(db.pool().clone()));

    let metrics = DerivedMetrics::compute(store.as_ref())
        .await
        .map_err(|e| anyhow!("error computing derived metrics: {}", e))?;

    info!(
        "Derived metrics: most recent date {}, one year ago {}, most active station {}",
        metrics.most_recent_date, metrics.one_year_ago, metrics.most_active_station
    );

    Ok(AppState { store, metrics })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    // Literal segments win over the {start} capture, so the three fixed
    // data routes are never swallowed by the parameterized ones.
    Router::new()
        .route("/", get(index))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
