//! Chat request payloads and reply assembly.

use serde::{Deserialize, Serialize};

use crate::sse::ChatChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /analytics/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    /// Full history, oldest first.
    pub messages: Vec<ChatMessage>,
    pub user_id: String,
    pub chat_id: Option<String>,
    pub title: Option<String>,
}

/// Assistant reply assembled from stream chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub content: String,
    /// Conversation id assigned by the service.
    pub id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Completed(ChatReply),
    /// The stream carried an `error` field; `reply` holds content received
    /// before it.
    Failed { reply: ChatReply, error: String },
}

impl ChatOutcome {
    pub fn reply(&self) -> &ChatReply {
        match self {
            Self::Completed(reply) | Self::Failed { reply, .. } => reply,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Concatenates chunk content in arrival order until an error terminates it.
#[derive(Debug, Default)]
pub struct ReplyBuilder {
    reply: ChatReply,
    error: Option<String>,
}

impl ReplyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a chunk. Returns `false` once the reply is terminated; later
    /// chunks are ignored.
    pub fn push(&mut self, chunk: ChatChunk) -> bool {
        if self.error.is_some() {
            return false;
        }
        if let Some(content) = chunk.content {
            self.reply.content.push_str(&content);
        }
        if chunk.id.is_some() {
            self.reply.id = chunk.id;
        }
        if chunk.title.is_some() {
            self.reply.title = chunk.title;
        }
        if let Some(error) = chunk.error {
            self.error = Some(error);
            return false;
        }
        true
    }

    pub fn content(&self) -> &str {
        &self.reply.content
    }

    pub fn finish(self) -> ChatOutcome {
        match self.error {
            Some(error) => ChatOutcome::Failed {
                reply: self.reply,
                error,
            },
            None => ChatOutcome::Completed(self.reply),
        }
    }
}
