//! Application-level payloads exchanged with the chat server.
//!
//! These ride inside Socket.IO event packets; the framing itself lives in
//! `socket::codec`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

/// Socket.IO event names used by the chat server.
pub mod events {
    /// Outbound user message.
    pub const MESSAGE: &str = "message";
    /// Inbound bot reply.
    pub const RESPONSE: &str = "response";
    /// Inbound free-form notice, sent by the server right after connect.
    pub const SERVER_MESSAGE: &str = "server_message";
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// One previous turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

/// Payload of the outbound `message` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub message: String,
    pub history: Vec<HistoryTurn>,
}

impl OutboundMessage {
    /// A message with empty history. The client never tracks turns.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }
}

/// Payload of the inbound `response` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub message: String,
}
