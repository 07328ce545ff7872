//! Configuration and event/command enums for the socket client.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for connecting to a Socket.IO endpoint.
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// Base URL of the server, e.g. `http://localhost:8000`.
    pub url: String,
    /// How long to wait for the WebSocket handshake.
    pub connect_timeout: Duration,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(15),
        }
    }
}

// ---------------------------------------------------------------------------
// Events & Commands
// ---------------------------------------------------------------------------

/// Events emitted by the socket client.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    /// The Socket.IO namespace connect was acknowledged.
    Connected { sid: Option<String> },
    /// A named event from the server.
    Event {
        name: String,
        data: serde_json::Value,
    },
    /// The connection ended.
    Disconnected,
    /// Handshake or transport failure.
    Error(String),
}

/// Commands sent to the connection task from the handle.
#[derive(Debug)]
pub(crate) enum SocketCommand {
    Emit {
        event: String,
        payload: serde_json::Value,
    },
    Disconnect,
}
