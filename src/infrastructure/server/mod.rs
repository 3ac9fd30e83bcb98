//! Webhook HTTP server

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::traits::ReplyTransport;
use crate::infrastructure::adapters::line::{verify_signature, WebhookPayload, SIGNATURE_HEADER};

/// Shared state for webhook handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: MessageDispatcher,
    pub transport: Arc<dyn ReplyTransport>,
    pub channel_secret: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/webhook", post(webhook))
        .with_state(Arc::new(state))
}

pub async fn serve(addr: &str, state: AppState) -> Result<(), BotError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BotError::Network(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Webhook server listening on http://{}", addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| BotError::Internal(e.to_string()))
}

async fn home() -> &'static str {
    "LINE Bot is running!"
}

async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match process_webhook(&state, signature, &body).await {
        Ok(_) => (StatusCode::OK, "OK"),
        Err(BotError::Signature(e)) => {
            tracing::warn!("Rejected webhook: invalid signature ({})", e);
            (StatusCode::BAD_REQUEST, "Invalid signature")
        }
        Err(BotError::Parse(e)) => {
            tracing::warn!("Rejected webhook: bad payload ({})", e);
            (StatusCode::BAD_REQUEST, "Bad request")
        }
        Err(e) => {
            tracing::error!("Webhook failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

/// Verify, parse and answer one webhook delivery.
/// Returns the number of replies sent; reply failures are logged only.
pub async fn process_webhook(
    state: &AppState,
    signature: Option<&str>,
    body: &[u8],
) -> Result<usize, BotError> {
    let signature = signature.ok_or_else(|| BotError::Signature("missing header".to_string()))?;
    verify_signature(&state.channel_secret, body, signature)?;

    tracing::debug!("Received body: {}", String::from_utf8_lossy(body));
    let payload = WebhookPayload::parse(body)?;

    let mut sent = 0;
    for event in &payload.events {
        let Some(message) = event.to_message() else {
            tracing::debug!("Skipping {} event", event.kind);
            continue;
        };
        let (Some(reply), Some(token)) = (state.dispatcher.handle(&message).await, message.reply_token.as_deref()) else {
            continue;
        };

        match state.transport.reply(token, &reply).await {
            Ok(()) => sent += 1,
            Err(e) => tracing::error!("Failed to reply to {}: {}", message.id, e),
        }
    }

    Ok(sent)
}
