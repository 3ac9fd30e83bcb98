//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use crate::domain::traits::{BotInfo, ReplyTransport};
use crate::application::errors::BotError;

async fn write_prompt<W: AsyncWrite + Unpin>(out: &mut W, prompt: &str) -> std::io::Result<()> {
    out.write_all(prompt.as_bytes()).await?;
    out.flush().await
}

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                name: "tenki-bot".to_string(),
                platform: "console".to_string(),
            },
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Prompt and read one trimmed line; `None` on EOF or read error
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        if let Err(e) = write_prompt(&mut tokio::io::stdout(), prompt).await {
            tracing::debug!("Failed to write prompt: {}", e);
        }

        match self.lines.lock().await.next_line().await {
            Ok(line) => line.map(|l| l.trim().to_string()),
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                None
            }
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyTransport for ConsoleAdapter {
    async fn reply(&self, _reply_token: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
