use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use examdesk::config::AppConfig;
use examdesk::handlers;
use examdesk::services::dialogue::DialogueEngine;
use examdesk::services::messaging::twilio::TwilioWhatsAppProvider;
use examdesk::state::AppState;
use examdesk::store::{AppointmentLedger, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let ledger = Arc::new(AppointmentLedger::new());
    let sessions = Arc::new(SessionStore::new());
    let engine = DialogueEngine::new(ledger, sessions)
        .with_session_ttl(config.session_ttl_minutes.and_then(chrono::Duration::try_minutes));

    let messaging = TwilioWhatsAppProvider::new(
        config.twilio_account_sid.clone(),
        config.twilio_auth_token.clone(),
        config.twilio_from_number.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        engine,
        messaging: Box::new(messaging),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/webhook/whatsapp",
            post(handlers::webhook::whatsapp_webhook),
        )
        .route("/api/dev/message", post(handlers::dev::send_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
