/// Hotline routing policy
///
/// Turns webhook inputs into the NCCOs and message texts the relay sends
/// back to the provider. Holds no per-call state.
use crate::domain::ncco::{ConversationAction, Ncco, NccoAction};

/// Rendered in place of a staff name when the answering number is not in
/// the directory
pub const UNKNOWN_STAFF_NAME: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotline {
    description: String,
    /// Completion webhook for recordings; `Some` when auto-recording is on
    recording_event_url: Option<String>,
}

impl Hotline {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            recording_event_url: None,
        }
    }

    /// Record every inbound conversation, reporting completion to `event_url`
    pub fn with_recording(mut self, event_url: impl Into<String>) -> Self {
        self.recording_event_url = Some(event_url.into());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_recording(&self) -> bool {
        self.recording_event_url.is_some()
    }

    /// Greeting spoken to a caller, including the recording disclosure when
    /// auto-recording is on
    pub fn greeting(&self) -> String {
        let greeting = format!("You've reached the {}.", self.description);
        if self.is_recording() {
            format!("{} This call is recorded.", greeting)
        } else {
            greeting
        }
    }

    /// NCCO for a caller: greet, then wait in the conversation until staff join
    pub fn caller_ncco(&self, conversation_uuid: &str, hold_music: &str) -> Ncco {
        let mut conversation = ConversationAction::new(conversation_uuid).with_music_on_hold(hold_music);
        if let Some(event_url) = &self.recording_event_url {
            conversation = conversation.recorded(event_url.clone());
        }

        vec![
            NccoAction::talk(self.greeting()),
            NccoAction::conversation(conversation),
        ]
    }

    /// NCCO for a staff member answering: welcome them, then join the
    /// caller's conversation as moderator
    pub fn staff_ncco(&self, staff_name: Option<&str>, origin_conversation_uuid: &str) -> Ncco {
        vec![
            NccoAction::talk(format!(
                "Hello {}, connecting you to {}.",
                display_name(staff_name),
                self.description
            )),
            NccoAction::conversation(ConversationAction::new(origin_conversation_uuid).as_moderator()),
        ]
    }

    /// Spoken into the caller's leg when a staff member picks up
    pub fn joining_notice(&self, staff_name: Option<&str>) -> String {
        format!("{} is joining this call.", display_name(staff_name))
    }

    /// Text relayed to each staff member for an inbound SMS
    pub fn forwarded_sms(&self, sender: &str, message: &str) -> String {
        format!("{}: {}", sender, message)
    }

    /// Reply sent back to whoever texted the hotline
    pub fn sms_acknowledgment(&self) -> String {
        format!(
            "Thanks for contacting the {}. Someone should follow-up shortly. Note: they may follow up from a different number.",
            self.description
        )
    }
}

fn display_name(staff_name: Option<&str>) -> &str {
    staff_name.unwrap_or(UNKNOWN_STAFF_NAME)
}
