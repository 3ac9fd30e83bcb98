use async_trait::async_trait;
use crate::application::errors::BotError;

/// Reply transport - abstraction for messaging platform adapters
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Answer a message identified by its reply token
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub name: String,
    pub platform: String,
}
