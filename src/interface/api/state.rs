//! Application state shared by all handlers

use super::recording::ProxyCredentials;
use crate::config::Config;
use crate::domain::hotline::Hotline;
use crate::domain::provider::TelephonyProvider;
use crate::domain::staff::StaffDirectory;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub hotline: Arc<Hotline>,
    pub staff: Arc<StaffDirectory>,
    pub provider: Arc<dyn TelephonyProvider>,
    pub credentials: Arc<ProxyCredentials>,
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(config: &Config, provider: Arc<dyn TelephonyProvider>) -> Self {
        Self {
            hotline: Arc::new(config.hotline.hotline()),
            staff: Arc::new(config.staff.clone()),
            provider,
            credentials: Arc::new(ProxyCredentials::new(
                config.provider.api_key.clone(),
                config.provider.api_secret.clone(),
            )),
            public_base_url: config.server.public_base_url.clone(),
        }
    }

    /// Base URL the provider should use to call back into this service
    pub fn callback_base(&self, host: &str) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", host))
    }
}
