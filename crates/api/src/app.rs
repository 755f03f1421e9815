//! Application state and router assembly.

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::require_actor;
use crate::routes::{alerts, audit_logs, health, measurements, reports, thresholds};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Identity comes from gateway headers; CORS stays permissive here.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // All /api/v1 routes require a resolved actor context.
    let api_routes = Router::new()
        // Measurements
        .route("/api/v1/measurements", post(measurements::create_measurement))
        .route("/api/v1/measurements", get(measurements::list_measurements))
        .route("/api/v1/measurements/:id", get(measurements::get_measurement))
        .route(
            "/api/v1/measurements/:id",
            patch(measurements::update_measurement),
        )
        .route(
            "/api/v1/measurements/:id",
            delete(measurements::delete_measurement),
        )
        // Alerts
        .route("/api/v1/alerts", post(alerts::create_alert))
        .route("/api/v1/alerts", get(alerts::list_alerts))
        .route("/api/v1/alerts/:id", get(alerts::get_alert))
        .route("/api/v1/alerts/:id", patch(alerts::update_alert))
        .route("/api/v1/alerts/:id", delete(alerts::delete_alert))
        .route(
            "/api/v1/alerts/:id/acknowledge",
            post(alerts::acknowledge_alert),
        )
        .route("/api/v1/alerts/:id/resolve", post(alerts::resolve_alert))
        // Thresholds
        .route("/api/v1/thresholds", post(thresholds::create_threshold))
        .route("/api/v1/thresholds", get(thresholds::list_thresholds))
        .route(
            "/api/v1/thresholds/:warehouse_id",
            get(thresholds::get_threshold),
        )
        .route(
            "/api/v1/thresholds/:warehouse_id",
            patch(thresholds::update_threshold),
        )
        .route(
            "/api/v1/thresholds/:warehouse_id",
            delete(thresholds::delete_threshold),
        )
        // Audit trail
        .route("/api/v1/audit-logs", get(audit_logs::list_audit_logs))
        // Reports
        .route(
            "/api/v1/reports/warehouse-summary",
            get(reports::warehouse_summary),
        )
        .route_layer(middleware::from_fn(require_actor));

    // Health endpoints stay public for probes.
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
