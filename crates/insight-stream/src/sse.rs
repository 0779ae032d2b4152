//! Decoder for the chat service's `data: {json}` line stream.
//!
//! Chunks may split lines anywhere, so the decoder buffers the trailing
//! partial line until its newline arrives.

use serde::Deserialize;
use tracing::warn;

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

/// One decoded stream payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of decoding a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Chunk(ChatChunk),
    /// A `data:` line whose payload failed to parse.
    Malformed { payload: String, reason: String },
    /// Blank lines, comments, other fields, and the end marker.
    Ignored,
}

/// Decodes one complete line, without its newline.
pub fn decode_line(line: &str) -> LineEvent {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return LineEvent::Ignored;
    };
    let payload = payload.strip_prefix(' ').unwrap_or(payload);
    if payload.trim().is_empty() || payload.trim() == DONE_MARKER {
        return LineEvent::Ignored;
    }
    match serde_json::from_str::<ChatChunk>(payload) {
        Ok(chunk) => LineEvent::Chunk(chunk),
        Err(err) => LineEvent::Malformed {
            payload: payload.to_string(),
            reason: err.to_string(),
        },
    }
}

/// Incremental line decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: String,
    malformed: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw text and returns the chunks of every line it completes.
    ///
    /// Malformed payloads are logged and skipped.
    pub fn feed(&mut self, text: &str) -> Vec<ChatChunk> {
        self.pending.push_str(text);
        let mut chunks = Vec::new();
        while let Some(newline) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=newline).collect();
            if let Some(chunk) = self.decode(&line[..line.len() - 1]) {
                chunks.push(chunk);
            }
        }
        chunks
    }

    /// Feeds raw bytes. A line that is not valid UTF-8 counts as malformed
    /// and is skipped; the pending partial line, if any, is dropped with it.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Vec<ChatChunk> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.feed(text),
            Err(err) => {
                self.pending.clear();
                self.malformed += 1;
                warn!(bytes = bytes.len(), reason = %err, "skipping stream line that is not UTF-8");
                Vec::new()
            }
        }
    }

    /// Decodes whatever remains after the stream ends without a final newline.
    pub fn finish(&mut self) -> Option<ChatChunk> {
        let rest = std::mem::take(&mut self.pending);
        self.decode(&rest)
    }

    /// Number of malformed lines skipped so far.
    pub fn malformed_count(&self) -> usize {
        self.malformed
    }

    fn decode(&mut self, line: &str) -> Option<ChatChunk> {
        match decode_line(line) {
            LineEvent::Chunk(chunk) => Some(chunk),
            LineEvent::Malformed { payload, reason } => {
                self.malformed += 1;
                warn!(payload = %payload, reason = %reason, "skipping malformed stream line");
                None
            }
            LineEvent::Ignored => None,
        }
    }
}
