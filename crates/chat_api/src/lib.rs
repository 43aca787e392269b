//! Transport primitives for the desktop chat backend.
//!
//! This crate owns request building, the incremental event-stream decoder and
//! the conversation REST calls. It holds no session state; the controller that
//! turns decoded events into UI state lives in `chat_session`.
//!
//! Wire contract of the streaming endpoint: frames separated by `"\n\n"`, each
//! meaningful frame being `data: ` followed by one of `{"content": ...}`,
//! `{"done": true}` or `{"error": ...}`.

pub mod cancel;
pub mod client;
pub mod config;
pub mod conversation;
pub mod endpoints;
pub mod error;
pub mod events;
pub mod payload;
pub mod sse;

pub use cancel::{await_or_cancel, is_cancelled, new_cancel_signal, CancelSignal};
pub use client::{ChatApiClient, ChunkStream};
pub use config::ChatApiConfig;
pub use conversation::{
    Conversation, ConversationId, Message, MessageRole, DEFAULT_CONVERSATION_TITLE,
};
pub use error::ChatApiError;
pub use events::ChatStreamEvent;
pub use payload::{Attachment, MessageBody};
pub use reqwest::StatusCode;
pub use sse::{decode_stream, SseFrameDecoder};
