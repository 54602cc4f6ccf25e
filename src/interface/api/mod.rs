//! API interface implementations

pub mod error;
pub mod health;
pub mod metrics_handler;
pub mod recording;
pub mod router;
pub mod state;
pub mod webhook;

pub use error::ApiError;
pub use metrics_handler::init_metrics;
pub use recording::ProxyCredentials;
pub use router::{build_router, metrics_router};
pub use state::AppState;
