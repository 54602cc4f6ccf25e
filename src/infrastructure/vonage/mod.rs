//! Vonage (Nexmo) Voice and SMS API client

pub mod auth;
pub mod client;

pub use auth::{ApplicationClaims, JwtSigner};
pub use client::VonageClient;
