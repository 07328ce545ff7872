//! Configuration and state types for the chat session.

use std::time::Duration;

use wirechat_common::ChatError;

use crate::protocol::InboundMessage;
use crate::socket::SocketConfig;

/// Configuration for a chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for the WebSocket handshake.
    pub connect_timeout: Duration,
    /// Key of the text field a send reads from.
    pub input_key: String,
    /// Key of the container replies are appended to.
    pub display_key: String,
    /// Prefix put in front of every rendered reply.
    pub reply_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            input_key: "userInput".into(),
            display_key: "chat".into(),
            reply_prefix: "Bot: ".into(),
        }
    }
}

impl SessionConfig {
    pub(crate) fn socket_config(&self, endpoint: &str) -> SocketConfig {
        SocketConfig {
            url: endpoint.to_string(),
            connect_timeout: self.connect_timeout,
        }
    }
}

/// Connection state as seen by the session.
///
/// `Connected` is terminal: a dropped transport is logged but the session
/// does not move back, and sends then fail at the socket handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected,
}

/// Callback invoked once per inbound reply, with the session's surface.
pub type ReplyHandler<S> = Box<dyn FnMut(&InboundMessage, &mut S) -> Result<(), ChatError> + Send>;
