//! Hotline relay - routes calls and texts from a telephony provider to staff
//!
//! Inbound calls are held in a conference while every staff member is
//! dialed; the first to answer joins as moderator. Inbound SMS are relayed
//! to all staff.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
