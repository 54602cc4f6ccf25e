//! Liveness probe

use super::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Health check
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "staff": state.staff.len(),
    }))
}
