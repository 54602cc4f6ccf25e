//! Domain layer - Hotline routing rules
//!
//! This layer contains:
//! - The staff directory and its phone lookup
//! - NCCO call-control actions returned to the provider
//! - Wait music selection
//! - The hotline policy that turns webhooks into instructions and messages
//! - The provider port used to place calls and send messages

pub mod hotline;
pub mod music_on_hold;
pub mod ncco;
pub mod provider;
pub mod shared;
pub mod staff;

// Re-export commonly used types
pub use hotline::Hotline;
pub use ncco::{ConversationAction, Ncco, NccoAction, TalkAction};
pub use provider::{CallCreated, MachineDetection, OutboundCall, SmsMessage, TelephonyProvider};
pub use shared::{DomainError, Result};
pub use staff::{StaffDirectory, StaffMember};
