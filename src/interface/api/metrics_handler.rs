//! Prometheus metrics handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder. Call once per process.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        "hotline_calls_answered_total",
        "Total number of inbound calls answered by the hotline"
    );
    describe_counter!(
        "hotline_staff_dials_total",
        "Total number of outbound calls placed to staff"
    );
    describe_counter!(
        "hotline_sms_received_total",
        "Total number of inbound SMS received by the hotline"
    );
    describe_counter!(
        "hotline_sms_sent_total",
        "Total number of SMS sent to staff and senders"
    );
    describe_counter!(
        "hotline_caller_notifications_total",
        "Caller notifications that a staff member is joining"
    );
    describe_counter!(
        "hotline_recordings_proxied_total",
        "Recording download requests"
    );

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(State(prometheus_handle): State<PrometheusHandle>) -> Response {
    (StatusCode::OK, prometheus_handle.render()).into_response()
}

pub fn record_call_answered() {
    counter!("hotline_calls_answered_total").increment(1);
}

pub fn record_staff_dials(count: usize) {
    counter!("hotline_staff_dials_total").increment(count as u64);
}

pub fn record_sms_received() {
    counter!("hotline_sms_received_total").increment(1);
}

pub fn record_sms_sent(count: usize) {
    counter!("hotline_sms_sent_total").increment(count as u64);
}

pub fn record_caller_notification(success: bool) {
    counter!("hotline_caller_notifications_total", "success" => success.to_string()).increment(1);
}

pub fn record_recording_proxied(authorized: bool) {
    counter!("hotline_recordings_proxied_total", "authorized" => authorized.to_string())
        .increment(1);
}
