//! Telephony provider port
//!
//! Handlers place calls, speak into calls, send SMS and download recordings
//! through this trait. The Vonage implementation lives in the
//! infrastructure layer.

use crate::domain::shared::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// What the provider does when an answering machine picks up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineDetection {
    /// Abandon the call attempt
    Hangup,
    /// Connect the machine anyway
    Continue,
}

/// Outbound call request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    pub to: String,
    pub from: String,
    /// Webhook the provider fetches the NCCO from once the call is answered
    pub answer_url: String,
    pub machine_detection: MachineDetection,
}

/// Provider acknowledgement of a created call
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CallCreated {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conversation_uuid: Option<String>,
}

/// Outbound SMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub from: String,
    pub to: String,
    pub text: String,
}

impl SmsMessage {
    pub fn new(from: impl Into<String>, to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
        }
    }
}

/// Telephony provider operations used by the hotline
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelephonyProvider: Send + Sync {
    /// Place an outbound call
    async fn create_call(&self, call: OutboundCall) -> Result<CallCreated>;

    /// Speak `text` into the live call identified by `call_uuid`
    async fn send_speech(&self, call_uuid: &str, text: &str) -> Result<()>;

    /// Send an SMS
    async fn send_message(&self, message: SmsMessage) -> Result<()>;

    /// Download a call recording
    async fn get_recording(&self, recording_url: &str) -> Result<Bytes>;
}
