//! Boundary services around the analytics engine.
//!
//! Everything here sits at an asynchronous edge: the remote pre-aggregation
//! service, the streaming chat service, and the sequencing that keeps stale
//! responses from overwriting newer ones.

pub mod chat;
pub mod client;
pub mod error;
pub mod remote;
pub mod sequence;
pub mod sse;
pub mod widget;

pub use chat::{ChatMessage, ChatOutcome, ChatReply, ChatRequest, ChatRole, ReplyBuilder};
pub use client::{DEFAULT_TIMEOUT, HealthStatus, RemoteClient};
pub use error::{Result, TransportError};
pub use remote::{AiSynthesis, Frequency, Insight, RemoteAggregation, RemotePeriod, Sentiment};
pub use sequence::{Latest, RequestSequencer, RequestToken};
pub use sse::{ChatChunk, LineEvent, SseDecoder, decode_line};
pub use widget::{HeadlessWidget, WidgetControl};
