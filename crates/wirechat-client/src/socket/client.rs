//! Public handle for interacting with the socket connection.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use wirechat_common::ChatError;

use super::connection::connection_loop;
use super::types::{SocketCommand, SocketConfig, SocketEvent};

/// Handle for interacting with the socket connection.
///
/// All methods are non-blocking and send commands to the background
/// connection task.
pub struct SocketClient {
    command_tx: mpsc::Sender<SocketCommand>,
    connected: Arc<RwLock<bool>>,
}

impl SocketClient {
    /// Create a new client and start the background connection.
    /// Returns `(client, event_receiver)`.
    pub fn connect(config: SocketConfig) -> (Self, mpsc::Receiver<SocketEvent>) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(64);
        let connected = Arc::new(RwLock::new(false));

        let client = Self::from_parts(command_tx, Arc::clone(&connected));

        tokio::spawn(connection_loop(config, connected, event_tx, command_rx));

        (client, event_rx)
    }

    pub(crate) fn from_parts(
        command_tx: mpsc::Sender<SocketCommand>,
        connected: Arc<RwLock<bool>>,
    ) -> Self {
        Self {
            command_tx,
            connected,
        }
    }

    /// Emit a named event. Fire-and-forget: nothing waits for the server.
    pub async fn emit(&self, event: &str, payload: serde_json::Value) -> Result<(), ChatError> {
        self.command_tx
            .send(SocketCommand::Emit {
                event: event.to_string(),
                payload,
            })
            .await
            .map_err(|_| ChatError::Connection("connection task has stopped".into()))
    }

    /// Check if the namespace connect has been acknowledged and the
    /// transport is still up.
    pub async fn is_connected(&self) -> bool {
        *self.connected.read().await
    }

    /// Disconnect from the server.
    pub async fn disconnect(&self) {
        let _ = self.command_tx.send(SocketCommand::Disconnect).await;
    }
}
