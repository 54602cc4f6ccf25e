//! Recording download proxy
//!
//! Lets external automation fetch a call recording without holding the
//! application private key. Callers prove themselves by passing the
//! provider API key and secret as query parameters.

use super::error::ApiError;
use super::metrics_handler::record_recording_proxied;
use super::state::AppState;
use super::webhook::required;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use tracing::{info, warn};

const RECORDING_CONTENT_TYPE: &str = "audio/mpeg";

/// API credentials a proxy request must present
pub struct ProxyCredentials {
    api_key: String,
    api_secret: String,
}

impl ProxyCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Plain equality on both values
    pub fn matches(&self, api_key: &str, api_secret: &str) -> bool {
        self.api_key == api_key && self.api_secret == api_secret
    }
}

/// Proxy a recording download
pub async fn proxy_recording(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let recording_url = required(&params, "recording_url")?;
    let api_key = required(&params, "api_key")?;
    let api_secret = required(&params, "api_secret")?;

    if !state.credentials.matches(api_key, api_secret) {
        warn!("Recording download rejected: credentials do not match");
        record_recording_proxied(false);
        return Err(ApiError::Unauthorized);
    }

    let audio = state.provider.get_recording(recording_url).await?;
    record_recording_proxied(true);
    info!("Proxied recording {} ({} bytes)", recording_url, audio.len());

    Ok(([(header::CONTENT_TYPE, RECORDING_CONTENT_TYPE)], audio).into_response())
}
