//! Webhook API Integration Tests

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bytes::Bytes;
use hotline_relay::config::Config;
use hotline_relay::domain::music_on_hold::WAIT_MUSIC;
use hotline_relay::domain::provider::{CallCreated, OutboundCall, SmsMessage, TelephonyProvider};
use hotline_relay::domain::{DomainError, MachineDetection};
use hotline_relay::interface::api::{build_router, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For `oneshot`

/// Provider double that records every request it receives
#[derive(Default)]
struct RecordingProvider {
    calls: Mutex<Vec<OutboundCall>>,
    speech: Mutex<Vec<(String, String)>>,
    messages: Mutex<Vec<SmsMessage>>,
    recordings: Mutex<Vec<String>>,
    fail_calls: bool,
}

#[async_trait]
impl TelephonyProvider for RecordingProvider {
    async fn create_call(&self, call: OutboundCall) -> hotline_relay::Result<CallCreated> {
        if self.fail_calls {
            return Err(DomainError::Provider("500 Internal Server Error".into()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(CallCreated {
            uuid: "new-call".into(),
            status: Some("started".into()),
            conversation_uuid: None,
        })
    }

    async fn send_speech(&self, call_uuid: &str, text: &str) -> hotline_relay::Result<()> {
        self.speech
            .lock()
            .unwrap()
            .push((call_uuid.to_string(), text.to_string()));
        Ok(())
    }

    async fn send_message(&self, message: SmsMessage) -> hotline_relay::Result<()> {
        self.messages.lock().unwrap().push(message);
        Ok(())
    }

    async fn get_recording(&self, recording_url: &str) -> hotline_relay::Result<Bytes> {
        self.recordings.lock().unwrap().push(recording_url.to_string());
        Ok(Bytes::from_static(b"mp3-bytes"))
    }
}

fn config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("NEXMO_API_KEY", "key"),
        ("NEXMO_API_SECRET", "secret"),
        ("NEXMO_APP_ID", "app-id"),
        ("NEXMO_PRIVATE_KEY_VOICE_APP", "unused"),
        (
            "PHONE_NUMBERS",
            r#"[{"name": "Ann", "phone": "1111"}, {"name": "Bo", "phone": "2222"}]"#,
        ),
        ("HOTLINE_DESC", "PyCascades hotline"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_vars(vars).expect("Failed to load test config")
}

fn setup(config: &Config, provider: RecordingProvider) -> (Router, Arc<RecordingProvider>) {
    let provider = Arc::new(provider);
    let app = build_router(AppState::new(config, provider.clone()));
    (app, provider)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("host", "relay.example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

#[tokio::test]
async fn test_inbound_call_scenario() {
    let (app, provider) = setup(&config(&[]), RecordingProvider::default());

    let (status, body) = get(app, "/webhook/answer/?to=9999&conversation_uuid=c1&uuid=u1").await;
    assert_eq!(status, StatusCode::OK);

    let ncco: Value = serde_json::from_slice(&body).unwrap();
    let track = ncco[1]["musicOnHoldUrl"][0].as_str().unwrap().to_string();
    assert!(WAIT_MUSIC.contains(&track.as_str()));
    assert_eq!(
        ncco,
        json!([
            {"action": "talk", "text": "You've reached the PyCascades hotline."},
            {
                "action": "conversation",
                "name": "c1",
                "musicOnHoldUrl": [track],
                "endOnExit": false,
                "startOnEnter": false
            }
        ])
    );

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    let mut targets: Vec<_> = calls.iter().map(|c| c.to.as_str()).collect();
    targets.sort();
    assert_eq!(targets, vec!["1111", "2222"]);
    for call in calls.iter() {
        assert_eq!(call.from, "9999");
        assert!(call.answer_url.contains("/c1/u1/"));
        assert_eq!(
            call.answer_url,
            "http://relay.example.org/webhook/answer_conference_call/c1/u1/"
        );
        assert_eq!(call.machine_detection, MachineDetection::Hangup);
    }
}

#[tokio::test]
async fn test_inbound_call_uses_public_base_url() {
    let config = config(&[("PUBLIC_BASE_URL", "https://hotline.example.com/")]);
    let (app, provider) = setup(&config, RecordingProvider::default());

    let (status, _) = get(app, "/webhook/answer/?to=9999&conversation_uuid=c7&uuid=u7").await;
    assert_eq!(status, StatusCode::OK);

    let calls = provider.calls.lock().unwrap();
    assert!(calls.iter().all(|c| {
        c.answer_url == "https://hotline.example.com/webhook/answer_conference_call/c7/u7/"
    }));
}

#[tokio::test]
async fn test_inbound_call_with_auto_recording() {
    let config = config(&[
        ("AUTO_RECORD", "true"),
        (
            "ZAPIER_CATCH_HOOK_RECORDING_FINISHED_URL",
            "https://hooks.zapier.example/catch/1",
        ),
    ]);
    let (app, _provider) = setup(&config, RecordingProvider::default());

    let (status, body) = get(app, "/webhook/answer/?to=9999&conversation_uuid=c1&uuid=u1").await;
    assert_eq!(status, StatusCode::OK);

    let ncco: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        ncco[0]["text"],
        "You've reached the PyCascades hotline. This call is recorded."
    );
    assert_eq!(ncco[1]["record"], true);
    assert_eq!(ncco[1]["eventUrl"], json!(["https://hooks.zapier.example/catch/1"]));
}

#[tokio::test]
async fn test_inbound_call_dial_failure() {
    let provider = RecordingProvider {
        fail_calls: true,
        ..Default::default()
    };
    let (app, _provider) = setup(&config(&[]), provider);

    let (status, body) = get(app, "/webhook/answer/?to=9999&conversation_uuid=c1&uuid=u1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("Provider error"));
}

#[tokio::test]
async fn test_conference_joined_notifies_caller() {
    let (app, provider) = setup(&config(&[]), RecordingProvider::default());

    let (status, body) = get(app, "/webhook/answer_conference_call/c1/u1/?to=2222").await;
    assert_eq!(status, StatusCode::OK);

    let ncco: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        ncco,
        json!([
            {"action": "talk", "text": "Hello Bo, connecting you to PyCascades hotline."},
            {"action": "conversation", "name": "c1", "startOnEnter": true, "endOnExit": true}
        ])
    );

    let speech = provider.speech.lock().unwrap();
    assert_eq!(
        speech.as_slice(),
        &[("u1".to_string(), "Bo is joining this call.".to_string())]
    );
}

#[tokio::test]
async fn test_conference_joined_by_unknown_number() {
    let (app, provider) = setup(&config(&[]), RecordingProvider::default());

    let (status, body) = get(app, "/webhook/answer_conference_call/c1/u1/?to=4444").await;
    assert_eq!(status, StatusCode::OK);

    let ncco: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ncco[0]["text"], "Hello None, connecting you to PyCascades hotline.");
    assert_eq!(
        provider.speech.lock().unwrap()[0].1,
        "None is joining this call."
    );
}

#[tokio::test]
async fn test_inbound_sms_fan_out() {
    let (app, provider) = setup(&config(&[]), RecordingProvider::default());

    let (status, body) = get(
        app,
        "/webhook/inbound-sms/?to=9999&msisdn=5550000&text=Someone%20is%20bothering%20me",
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let messages = provider.messages.lock().unwrap();
    assert_eq!(messages.len(), 3);

    let relayed: Vec<_> = messages.iter().filter(|m| m.to != "5550000").collect();
    assert_eq!(relayed.len(), 2);
    for message in relayed {
        assert_eq!(message.from, "9999");
        assert_eq!(message.text, "5550000: Someone is bothering me");
    }

    let ack = messages.last().unwrap();
    assert_eq!(ack.to, "5550000");
    assert_eq!(ack.from, "9999");
    assert_eq!(
        ack.text,
        "Thanks for contacting the PyCascades hotline. Someone should follow-up shortly. Note: they may follow up from a different number."
    );
}

#[tokio::test]
async fn test_inbound_sms_missing_text() {
    let (app, provider) = setup(&config(&[]), RecordingProvider::default());

    let (status, _) = get(app, "/webhook/inbound-sms/?to=9999&msisdn=5550000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(provider.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_recording_proxy_rejects_partial_credentials() {
    let (app, provider) = setup(&config(&[]), RecordingProvider::default());

    let (status, body) = get(
        app,
        "/recordings/?recording_url=https%3A%2F%2Fapi.nexmo.com%2Fv1%2Ffiles%2Fabc&api_key=key&api_secret=not-secret",
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
    assert!(provider.recordings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_recording_proxy_streams_audio() {
    let (app, provider) = setup(&config(&[]), RecordingProvider::default());

    let (status, body) = get(
        app,
        "/recordings/?recording_url=https%3A%2F%2Fapi.nexmo.com%2Fv1%2Ffiles%2Fabc&api_key=key&api_secret=secret",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"mp3-bytes");
    assert_eq!(
        provider.recordings.lock().unwrap().as_slice(),
        &["https://api.nexmo.com/v1/files/abc".to_string()]
    );
}
