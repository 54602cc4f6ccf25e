//! Telephony provider webhooks
//!
//! - `answer_call`: a caller reached the hotline; hold them in a
//!   conversation and ring every staff member
//! - `answer_conference_call`: a staff member picked up; tell the caller and
//!   bridge the staff member in as moderator
//! - `inbound_sms`: relay a text to every staff member and acknowledge it

use super::error::ApiError;
use super::metrics_handler::{
    record_call_answered, record_caller_notification, record_sms_received, record_sms_sent,
    record_staff_dials,
};
use super::state::AppState;
use crate::domain::music_on_hold;
use crate::domain::ncco::Ncco;
use crate::domain::provider::{MachineDetection, OutboundCall, SmsMessage};
use axum::{
    extract::{Host, Path, Query, State},
    http::StatusCode,
    Json,
};
use futures::future::try_join_all;
use std::collections::HashMap;
use tracing::{error, info};

/// Look up a required query parameter
pub(crate) fn required<'a>(
    params: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, ApiError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or(ApiError::MissingParameter(name))
}

/// Answer an inbound call to the hotline
pub async fn answer_call(
    State(state): State<AppState>,
    Host(host): Host,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Ncco>, ApiError> {
    let hotline_number = required(&params, "to")?;
    let conversation_uuid = required(&params, "conversation_uuid")?.trim();
    let call_uuid = required(&params, "uuid")?.trim();

    info!(
        "Inbound call {} to {} (conversation {})",
        call_uuid, hotline_number, conversation_uuid
    );
    record_call_answered();

    let hold_music = music_on_hold::pick_track(&mut rand::thread_rng());
    let ncco = state.hotline.caller_ncco(conversation_uuid, hold_music);

    let answer_url = format!(
        "{}/webhook/answer_conference_call/{}/{}/",
        state.callback_base(&host),
        conversation_uuid,
        call_uuid
    );

    // First failure aborts the request; calls already placed are not undone
    let dials = state.staff.iter().map(|member| {
        state.provider.create_call(OutboundCall {
            to: member.phone.clone(),
            from: hotline_number.to_string(),
            answer_url: answer_url.clone(),
            machine_detection: MachineDetection::Hangup,
        })
    });
    let placed = try_join_all(dials).await?;

    record_staff_dials(placed.len());
    info!(
        "Dialed {} staff into conversation {}",
        placed.len(),
        conversation_uuid
    );

    Ok(Json(ncco))
}

/// A staff member answered the call placed by `answer_call`
pub async fn answer_conference_call(
    State(state): State<AppState>,
    Path((origin_conversation_uuid, origin_call_uuid)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Ncco>, ApiError> {
    let staff_phone = required(&params, "to")?;
    let staff_name = state.staff.owner_of(staff_phone);

    let notice = state.hotline.joining_notice(staff_name);
    match state.provider.send_speech(&origin_call_uuid, &notice).await {
        Ok(()) => {
            info!("Notified caller {}: {}", origin_call_uuid, notice);
            record_caller_notification(true);
        }
        Err(e) => {
            // The caller may already have hung up; the staff member still joins
            error!(
                "Error sending speech to {}, owner is {:?}: {}",
                origin_call_uuid, staff_name, e
            );
            record_caller_notification(false);
        }
    }

    Ok(Json(
        state
            .hotline
            .staff_ncco(staff_name, &origin_conversation_uuid),
    ))
}

/// Relay an inbound SMS to all staff and acknowledge the sender
pub async fn inbound_sms(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let hotline_number = required(&params, "to")?;
    let sender = required(&params, "msisdn")?;
    let message = required(&params, "text")?;

    info!("Inbound SMS from {} to {}", sender, hotline_number);
    record_sms_received();

    let forwarded = state.hotline.forwarded_sms(sender, message);
    let relays = state.staff.iter().map(|member| {
        state
            .provider
            .send_message(SmsMessage::new(hotline_number, &member.phone, forwarded.clone()))
    });
    try_join_all(relays).await?;

    state
        .provider
        .send_message(SmsMessage::new(
            hotline_number,
            sender,
            state.hotline.sms_acknowledgment(),
        ))
        .await?;

    record_sms_sent(state.staff.len() + 1);
    Ok(StatusCode::NO_CONTENT)
}
