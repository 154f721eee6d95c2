//! Chat plumbing: incoming messages and a console stand-in for a chat room

use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::handler::LunchHandler;
use crate::http::HttpGet;

/// A message heard in the chat
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Who said it
    pub user: String,
    /// Message content
    pub content: String,
    /// When the message was received
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(user: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            content: content.into(),
            received_at: Utc::now(),
        }
    }
}

/// Treats every input line as a chat message from one user and writes replies to `out`
pub struct ConsoleChat {
    user: String,
}

impl ConsoleChat {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Listen until `input` closes
    pub async fn run<H, R, W>(&self, handler: &LunchHandler<H>, input: R, out: &mut W) -> std::io::Result<()>
    where
        H: HttpGet,
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            self.hear(handler, &line, out).await?;
        }
        Ok(())
    }

    /// Pass one line to the handler and write its reply, if any
    pub async fn hear<H, W>(&self, handler: &LunchHandler<H>, line: &str, out: &mut W) -> std::io::Result<()>
    where
        H: HttpGet,
        W: AsyncWrite + Unpin,
    {
        let message = IncomingMessage::new(self.user.clone(), line.trim());
        debug!(user = %message.user, received_at = %message.received_at, "Heard message");

        if let Some(reply) = handler.handle(&message).await {
            out.write_all(reply.content.as_bytes()).await?;
            out.write_all(b"\n").await?;
            out.flush().await?;
        }
        Ok(())
    }
}
