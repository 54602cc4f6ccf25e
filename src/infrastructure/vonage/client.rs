/// HTTP client for the Vonage Voice and SMS APIs
use super::auth::JwtSigner;
use crate::config::ProviderConfig;
use crate::domain::provider::{CallCreated, MachineDetection, OutboundCall, SmsMessage, TelephonyProvider};
use crate::domain::shared::{DomainError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Endpoint type for a phone number in Voice API requests
#[derive(Debug, Serialize)]
struct PhoneEndpoint<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    number: &'a str,
}

impl<'a> PhoneEndpoint<'a> {
    fn new(number: &'a str) -> Self {
        Self {
            kind: "phone",
            number,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateCallRequest<'a> {
    to: [PhoneEndpoint<'a>; 1],
    from: PhoneEndpoint<'a>,
    answer_url: [&'a str; 1],
    machine_detection: MachineDetection,
}

#[derive(Debug, Serialize)]
struct TalkRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SendSmsRequest<'a> {
    api_key: &'a str,
    api_secret: &'a str,
    from: &'a str,
    to: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendSmsResponse {
    #[serde(default)]
    messages: Vec<SmsStatus>,
}

#[derive(Debug, Deserialize)]
struct SmsStatus {
    status: String,
    #[serde(rename = "message-id")]
    message_id: Option<String>,
    #[serde(rename = "error-text")]
    error_text: Option<String>,
}

/// Vonage client
#[derive(Clone)]
pub struct VonageClient {
    http: reqwest::Client,
    signer: JwtSigner,
    api_key: String,
    api_secret: String,
    api_base_url: String,
    rest_base_url: String,
}

impl VonageClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::InvalidConfiguration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            signer: JwtSigner::new(config.application_id.clone(), &config.private_key)?,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            rest_base_url: config.rest_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn voice_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Provider(format!("{} request failed: {}", what, e)))?;

        response
            .error_for_status()
            .map_err(|e| DomainError::Provider(format!("{} rejected: {}", what, e)))
    }
}

#[async_trait]
impl TelephonyProvider for VonageClient {
    async fn create_call(&self, call: OutboundCall) -> Result<CallCreated> {
        debug!("Creating call {} -> {}", call.from, call.to);

        let body = CreateCallRequest {
            to: [PhoneEndpoint::new(&call.to)],
            from: PhoneEndpoint::new(&call.from),
            answer_url: [call.answer_url.as_str()],
            machine_detection: call.machine_detection,
        };
        let request = self
            .http
            .post(self.voice_url("/v1/calls"))
            .bearer_auth(self.signer.token()?)
            .json(&body);

        let created: CallCreated = self
            .send(request, "create call")
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Provider(format!("invalid create call response: {}", e)))?;

        info!("Call {} created to {}", created.uuid, call.to);
        Ok(created)
    }

    async fn send_speech(&self, call_uuid: &str, text: &str) -> Result<()> {
        let request = self
            .http
            .put(self.voice_url(&format!("/v1/calls/{}/talk", call_uuid)))
            .bearer_auth(self.signer.token()?)
            .json(&TalkRequest { text });

        self.send(request, "send speech").await?;
        Ok(())
    }

    async fn send_message(&self, message: SmsMessage) -> Result<()> {
        let body = SendSmsRequest {
            api_key: &self.api_key,
            api_secret: &self.api_secret,
            from: &message.from,
            to: &message.to,
            text: &message.text,
        };
        let request = self
            .http
            .post(format!("{}/sms/json", self.rest_base_url))
            .json(&body);

        let response: SendSmsResponse = self
            .send(request, "send message")
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Provider(format!("invalid send message response: {}", e)))?;

        // Per-message failures come back with HTTP 200; they are reported, not raised
        for status in &response.messages {
            if status.status == "0" {
                debug!("Message {:?} accepted for {}", status.message_id, message.to);
            } else {
                warn!(
                    "Message to {} rejected with status {}: {}",
                    message.to,
                    status.status,
                    status.error_text.as_deref().unwrap_or("unknown error")
                );
            }
        }

        Ok(())
    }

    async fn get_recording(&self, recording_url: &str) -> Result<Bytes> {
        let request = self
            .http
            .get(recording_url)
            .bearer_auth(self.signer.token()?);

        self.send(request, "get recording")
            .await?
            .bytes()
            .await
            .map_err(|e| DomainError::Provider(format!("failed to read recording: {}", e)))
    }
}
