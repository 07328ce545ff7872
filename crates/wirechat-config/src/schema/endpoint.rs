use serde::{Deserialize, Serialize};

/// Where the chat session connects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the Socket.IO server (`http`, `https`, `ws` or `wss`).
    pub url: String,
    /// Seconds to wait for the WebSocket handshake (valid range: 1-120).
    pub connect_timeout: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".into(),
            connect_timeout: 15,
        }
    }
}
