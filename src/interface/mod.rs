//! Interface layer - External interfaces
//!
//! This layer handles:
//! - Provider webhook endpoints
//! - The recording download proxy
//! - Health and metrics endpoints

pub mod api;
