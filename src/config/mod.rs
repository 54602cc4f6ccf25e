//! Configuration management
//!
//! All settings come from environment variables and are read exactly once at
//! startup. The resulting [`Config`] is immutable and shared with every
//! handler through the router state.

use crate::domain::hotline::Hotline;
use crate::domain::staff::StaffDirectory;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_BASE_URL: &str = "https://api.nexmo.com";
const DEFAULT_REST_BASE_URL: &str = "https://rest.nexmo.com";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Failed to read environment: {0}")]
    Source(#[from] ::config::ConfigError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub hotline: HotlineConfig,
    pub staff: StaffDirectory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Scheme and authority used in callback URLs handed to the provider.
    /// Falls back to `http://<Host header>` when unset.
    pub public_base_url: Option<String>,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub api_secret: String,
    pub application_id: String,
    /// PEM encoded application private key
    pub private_key: String,
    pub api_base_url: String,
    pub rest_base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("private_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("rest_base_url", &self.rest_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct HotlineConfig {
    pub description: String,
    pub auto_record: bool,
    pub recording_event_url: Option<String>,
}

impl HotlineConfig {
    /// Build the routing policy described by this configuration
    pub fn hotline(&self) -> Hotline {
        let hotline = Hotline::new(self.description.clone());
        match (&self.recording_event_url, self.auto_record) {
            (Some(url), true) => hotline.with_recording(url.clone()),
            _ => hotline,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let source = ::config::Environment::default()
            .source(vars.map(|vars| vars.into_iter().collect::<::config::Map<_, _>>()));
        let env = EnvVars(::config::Config::builder().add_source(source).build()?);

        let server = ServerConfig {
            host: env.optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.parsed("PORT")?.unwrap_or(DEFAULT_PORT),
            public_base_url: env
                .optional("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
        };

        let provider = ProviderConfig {
            api_key: env.required("NEXMO_API_KEY")?,
            api_secret: env.required("NEXMO_API_SECRET")?,
            application_id: env.required("NEXMO_APP_ID")?,
            // Keys pasted into a single-line variable keep their newlines escaped
            private_key: env.required("NEXMO_PRIVATE_KEY_VOICE_APP")?.replace("\\n", "\n"),
            api_base_url: env
                .optional("NEXMO_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            rest_base_url: env
                .optional("NEXMO_REST_BASE_URL")
                .unwrap_or_else(|| DEFAULT_REST_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                env.parsed("PROVIDER_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            ),
        };

        let auto_record = env
            .optional("AUTO_RECORD")
            .map(|flag| flag.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let recording_event_url = env.optional("ZAPIER_CATCH_HOOK_RECORDING_FINISHED_URL");
        if auto_record && recording_event_url.is_none() {
            return Err(ConfigError::Missing("ZAPIER_CATCH_HOOK_RECORDING_FINISHED_URL"));
        }

        let hotline = HotlineConfig {
            description: env.required("HOTLINE_DESC")?,
            auto_record,
            recording_event_url,
        };

        let staff = StaffDirectory::from_json(&env.required("PHONE_NUMBERS")?).map_err(|e| {
            ConfigError::Invalid {
                var: "PHONE_NUMBERS",
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            server,
            provider,
            hotline,
            staff,
        })
    }
}

/// Environment lookups by upper-case variable name
struct EnvVars(::config::Config);

impl EnvVars {
    fn optional(&self, var: &'static str) -> Option<String> {
        self.0
            .get_string(&var.to_lowercase())
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn required(&self, var: &'static str) -> Result<String, ConfigError> {
        self.optional(var).ok_or(ConfigError::Missing(var))
    }

    fn parsed<T>(&self, var: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        self.optional(var)
            .map(|value| {
                value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                    var,
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}
