//! LINE Messaging API adapter

pub mod signature;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Content, Message, User};
use crate::domain::traits::{BotInfo, ReplyTransport};
use crate::application::errors::BotError;

pub use signature::{sign, verify_signature, SIGNATURE_HEADER};

/// Webhook request body
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub reply_token: Option<String>,
    pub source: Option<Source>,
    pub message: Option<EventMessage>,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub text: Option<String>,
}

impl WebhookPayload {
    pub fn parse(body: &[u8]) -> Result<Self, BotError> {
        serde_json::from_slice(body).map_err(|e| BotError::Parse(e.to_string()))
    }
}

impl Event {
    /// Domain message for a replyable `message` event
    pub fn to_message(&self) -> Option<Message> {
        if self.kind != "message" {
            return None;
        }
        let reply_token = self.reply_token.as_deref()?;
        let event_message = self.message.as_ref()?;

        let content = match (event_message.kind.as_str(), &event_message.text) {
            ("text", Some(text)) => Content::Text(text.clone()),
            (kind, _) => Content::Other(kind.to_string()),
        };

        let mut message = Message::new(content)
            .with_id(&event_message.id)
            .with_reply_token(reply_token)
            .with_platform("line");

        if let Some(user_id) = self.source.as_ref().and_then(|s| s.user_id.as_deref()) {
            message = message.with_sender(User::new(user_id));
        }
        if let Some(ts) = self.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis) {
            message = message.with_timestamp(ts);
        }
        Some(message)
    }
}

/// LINE reply client
pub struct LineAdapter {
    access_token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl LineAdapter {
    pub fn new(access_token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            info: BotInfo {
                name: "tenki-bot".to_string(),
                platform: "line".to_string(),
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    /// Get the API URL for a path
    fn api_url(&self, path: &str) -> String {
        format!("{}/v2/bot/{}", self.api_base, path)
    }
}

#[async_trait]
impl ReplyTransport for LineAdapter {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ReplyRequest<'a> {
            reply_token: &'a str,
            messages: Vec<TextMessage<'a>>,
        }

        #[derive(Serialize)]
        struct TextMessage<'a> {
            #[serde(rename = "type")]
            kind: &'static str,
            text: &'a str,
        }

        let request = ReplyRequest {
            reply_token,
            messages: vec![TextMessage { kind: "text", text }],
        };

        let response = self.client
            .post(self.api_url("message/reply"))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!("LINE API error {}: {}", status, error)));
        }

        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
