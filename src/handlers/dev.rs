use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct DevMessage {
    pub from: String,
    pub body: String,
}

#[derive(Serialize)]
pub struct DevReply {
    pub reply: String,
}

/// Drive the dialogue engine directly, bypassing Twilio. Handy for local
/// testing with curl.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DevMessage>,
) -> Json<DevReply> {
    let reply = state.engine.handle(payload.from.trim(), payload.body.trim());
    Json(DevReply { reply })
}
