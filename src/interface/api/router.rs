//! API Router configuration

use super::health::health_check;
use super::metrics_handler::metrics_handler;
use super::recording::proxy_recording;
use super::state::AppState;
use super::webhook::{answer_call, answer_conference_call, inbound_sms};
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

/// Build the webhook router
pub fn build_router(state: AppState) -> Router {
    // Provider webhooks are configured to use GET
    let webhook_routes = Router::new()
        .route("/webhook/answer/", get(answer_call))
        .route(
            "/webhook/answer_conference_call/:origin_conversation_uuid/:origin_call_uuid/",
            get(answer_conference_call),
        )
        .route("/webhook/inbound-sms/", get(inbound_sms));

    let recording_routes = Router::new().route("/recordings/", get(proxy_recording));

    Router::new()
        .route("/health", get(health_check))
        .merge(webhook_routes)
        .merge(recording_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Prometheus scrape endpoint (separate state)
pub fn metrics_router(prometheus_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle)
}
