use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use crate::state::AppState;

/// Twilio's form-encoded webhook payload. Only `From` and `Body` drive
/// the dialogue; the other fields document the wire format.
#[derive(Deserialize)]
#[allow(dead_code)]
pub struct TwilioWebhookForm {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "MessageSid")]
    pub message_sid: Option<String>,
}

/// Inbound WhatsApp message. Always answers 200 with an empty TwiML
/// document; the reply itself goes out through the messaging provider.
pub async fn whatsapp_webhook(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TwilioWebhookForm>,
) -> Response {
    let from = form.from.trim();
    let body = form.body.trim();

    // Sessions are keyed by the bare sender address, without the
    // channel prefix Twilio puts on WhatsApp numbers.
    let session_id = from.strip_prefix("whatsapp:").unwrap_or(from);

    tracing::info!(from = %from, body = %body, "incoming message");

    let reply = state.engine.handle(session_id, body);

    if let Err(e) = state.messaging.send_message(from, &reply).await {
        tracing::error!(error = %e, to = %from, "failed to send reply");
    }

    twiml_response()
}

fn twiml_response() -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        "<Response></Response>",
    )
        .into_response()
}
