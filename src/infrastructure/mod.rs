//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - The Vonage Voice/SMS client implementing the provider port

pub mod vonage;
