use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wirechat_common::ChatError;

use crate::protocol::{events, InboundMessage, OutboundMessage};
use crate::socket::{SocketClient, SocketEvent};
use crate::surface::Surface;

use super::types::{ReplyHandler, SessionConfig, SessionState};

/// Bridges one text field to one chat endpoint and renders replies.
pub struct ChatSession<S: Surface> {
    config: SessionConfig,
    surface: S,
    state: SessionState,
    client: Option<SocketClient>,
    events: Option<mpsc::Receiver<SocketEvent>>,
    reply_handler: ReplyHandler<S>,
}

impl<S: Surface + 'static> ChatSession<S> {
    /// Create a disconnected session. Replies are rendered as
    /// `<reply_prefix><text>` lines into the display container until
    /// [`on_reply`](Self::on_reply) installs something else.
    pub fn new(config: SessionConfig, surface: S) -> Self {
        let reply_handler = render_into(config.display_key.clone(), config.reply_prefix.clone());
        Self {
            config,
            surface,
            state: SessionState::Disconnected,
            client: None,
            events: None,
            reply_handler,
        }
    }

    /// Open the connection to `endpoint` in the background. The session
    /// becomes `Connected` once the matching event is handled.
    ///
    /// A session owns at most one connection; calling this again is a no-op.
    pub fn connect(&mut self, endpoint: &str) {
        if self.client.is_some() {
            debug!(endpoint, "Session already owns a connection, ignoring connect");
            return;
        }
        let (client, events) = SocketClient::connect(self.config.socket_config(endpoint));
        self.attach(client, events);
    }

    pub(crate) fn attach(&mut self, client: SocketClient, events: mpsc::Receiver<SocketEvent>) {
        self.client = Some(client);
        self.events = Some(events);
    }

    /// Replace the reply handler.
    pub fn on_reply<F>(&mut self, handler: F)
    where
        F: FnMut(&InboundMessage, &mut S) -> Result<(), ChatError> + Send + 'static,
    {
        self.reply_handler = Box::new(handler);
    }

    /// Send the current value of the text field as a `message` event.
    ///
    /// Empty input is sent as-is. Nothing is transmitted before the session
    /// is `Connected`.
    pub async fn send_current_input(&mut self) -> Result<OutboundMessage, ChatError> {
        let client = match (self.state, &self.client) {
            (SessionState::Connected, Some(client)) => client,
            _ => {
                return Err(ChatError::Connection(
                    "not connected, message not sent".into(),
                ))
            }
        };

        let text = self.surface.input_value(&self.config.input_key)?;
        let outbound = OutboundMessage::new(text);
        let payload =
            serde_json::to_value(&outbound).map_err(|e| ChatError::Protocol(e.to_string()))?;
        client.emit(events::MESSAGE, payload).await?;

        debug!(len = outbound.message.len(), "Message sent");
        Ok(outbound)
    }

    /// Wait for the next socket event. Returns `None` once the connection
    /// task has finished, or straight away if there is no connection.
    pub async fn next_event(&mut self) -> Option<SocketEvent> {
        match self.events.as_mut() {
            Some(events) => events.recv().await,
            None => None,
        }
    }

    /// Apply one socket event to the session.
    pub fn handle_event(&mut self, event: SocketEvent) -> Result<(), ChatError> {
        match event {
            SocketEvent::Connected { sid } => {
                self.state = SessionState::Connected;
                info!(sid = sid.as_deref().unwrap_or("-"), "Connected to WebSocket server");
                Ok(())
            }
            SocketEvent::Event { name, data } => self.dispatch(&name, data),
            SocketEvent::Disconnected => {
                warn!("Connection to chat server closed");
                Ok(())
            }
            SocketEvent::Error(message) => Err(ChatError::Connection(message)),
        }
    }

    fn dispatch(&mut self, name: &str, data: Value) -> Result<(), ChatError> {
        match name {
            events::RESPONSE => {
                let reply: InboundMessage = serde_json::from_value(data)
                    .map_err(|e| ChatError::Protocol(format!("malformed '{name}' payload: {e}")))?;
                info!(message = %reply.message, "Bot reply");
                (self.reply_handler)(&reply, &mut self.surface)
            }
            events::SERVER_MESSAGE => {
                let notice = match data.as_str() {
                    Some(text) => text.to_string(),
                    None => data.to_string(),
                };
                info!(notice = %notice, "Server message");
                Ok(())
            }
            _ => {
                debug!(event = %name, "Unhandled server event");
                Ok(())
            }
        }
    }

    /// Disconnect and drop the connection. Later sends fail.
    pub async fn close(&mut self) {
        if let Some(client) = self.client.take() {
            client.disconnect().await;
        }
        self.events = None;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// The default reply handler: one prefixed line per reply.
fn render_into<S: Surface + 'static>(display_key: String, prefix: String) -> ReplyHandler<S> {
    Box::new(move |reply: &InboundMessage, surface: &mut S| {
        surface.append_text(&display_key, &format!("{prefix}{}", reply.message))
    })
}
