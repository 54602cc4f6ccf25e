//! NCCO (call control object) actions
//!
//! The provider expects a JSON array of actions, each tagged by an
//! `"action"` field. Only the two actions the hotline uses are modelled.

use serde::{Deserialize, Serialize};

/// Ordered list of call-control actions
pub type Ncco = Vec<NccoAction>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum NccoAction {
    /// Speak text into the call
    Talk(TalkAction),
    /// Join the call into a named conversation
    Conversation(ConversationAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkAction {
    pub text: String,
}

/// Conference join settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_on_hold_url: Option<Vec<String>>,
    pub end_on_exit: bool,
    pub start_on_enter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_url: Option<Vec<String>>,
}

impl ConversationAction {
    /// A conversation that neither starts on enter nor ends on exit
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            music_on_hold_url: None,
            end_on_exit: false,
            start_on_enter: false,
            record: None,
            event_url: None,
        }
    }

    /// Play `url` to participants waiting for the conversation to start
    pub fn with_music_on_hold(mut self, url: impl Into<String>) -> Self {
        self.music_on_hold_url = Some(vec![url.into()]);
        self
    }

    /// Join as moderator: start on enter, end the conversation on exit
    pub fn as_moderator(mut self) -> Self {
        self.start_on_enter = true;
        self.end_on_exit = true;
        self
    }

    /// Record the conversation and report completion to `event_url`
    pub fn recorded(mut self, event_url: impl Into<String>) -> Self {
        self.record = Some(true);
        self.event_url = Some(vec![event_url.into()]);
        self
    }
}

impl NccoAction {
    pub fn talk(text: impl Into<String>) -> Self {
        NccoAction::Talk(TalkAction { text: text.into() })
    }

    pub fn conversation(action: ConversationAction) -> Self {
        NccoAction::Conversation(action)
    }
}
