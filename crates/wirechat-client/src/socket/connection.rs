//! Background WebSocket connection task.
//!
//! One attempt per client. There is no reconnect: when the transport ends
//! the task reports `Disconnected` and exits.

use std::sync::Arc;

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::{mpsc, RwLock};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

use super::codec::{self, Packet};
use super::types::{SocketCommand, SocketConfig, SocketEvent};

// ---------------------------------------------------------------------------
// Connection Loop
// ---------------------------------------------------------------------------

/// Background task owning the WebSocket stream.
pub(crate) async fn connection_loop(
    config: SocketConfig,
    connected: Arc<RwLock<bool>>,
    event_tx: mpsc::Sender<SocketEvent>,
    mut command_rx: mpsc::Receiver<SocketCommand>,
) {
    let url = match codec::endpoint_url(&config.url) {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Invalid chat endpoint");
            let _ = event_tx.send(SocketEvent::Error(e.to_string())).await;
            return;
        }
    };
    info!(url = %url, "Connecting to chat server");

    let ws_stream = match tokio::time::timeout(
        config.connect_timeout,
        tokio_tungstenite::connect_async(url.as_str()),
    )
    .await
    {
        Ok(Ok((ws_stream, _))) => ws_stream,
        Ok(Err(e)) => {
            error!(error = %e, "Failed to connect to chat server");
            let _ = event_tx
                .send(SocketEvent::Error(format!("Connection failed: {e}")))
                .await;
            return;
        }
        Err(_elapsed) => {
            let secs = config.connect_timeout.as_secs();
            error!("WebSocket connection timed out after {secs}s");
            let _ = event_tx
                .send(SocketEvent::Error(format!(
                    "Connection timed out after {secs}s"
                )))
                .await;
            return;
        }
    };

    let (mut sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            cmd = command_rx.recv() => {
                match cmd {
                    Some(SocketCommand::Emit { event, payload }) => {
                        if !*connected.read().await {
                            warn!(event = %event, "Dropping emit before namespace connect");
                            continue;
                        }
                        if send_packet(&mut sink, &Packet::event(event, payload)).await.is_err() {
                            break;
                        }
                    }
                    // Handle dropped: nobody can send any more, so leave.
                    Some(SocketCommand::Disconnect) | None => {
                        let _ = send_packet(&mut sink, &Packet::disconnect()).await;
                        let _ = sink.send(WsMessage::Close(None)).await;
                        info!("Disconnected from chat server");
                        break;
                    }
                }
            }

            frame = stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => match codec::decode(&text) {
                        Ok(packet) => {
                            if !handle_packet(packet, &mut sink, &connected, &event_tx).await {
                                break;
                            }
                        }
                        Err(e) => {
                            debug!(error = %e, frame = %text.as_str(), "Unrecognized frame from chat server");
                        }
                    },
                    Some(Ok(WsMessage::Ping(data))) => {
                        let _ = sink.send(WsMessage::Pong(data)).await;
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        info!("Chat server closed connection");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    *connected.write().await = false;
    let _ = event_tx.send(SocketEvent::Disconnected).await;
}

// ---------------------------------------------------------------------------
// Packet Handling
// ---------------------------------------------------------------------------

/// React to one decoded packet. Returns `false` when the connection should end.
async fn handle_packet<S>(
    packet: Packet,
    sink: &mut S,
    connected: &Arc<RwLock<bool>>,
    event_tx: &mpsc::Sender<SocketEvent>,
) -> bool
where
    S: Sink<WsMessage> + Unpin,
{
    match packet {
        Packet::Open(handshake) => {
            debug!(
                sid = %handshake.sid,
                ping_interval = handshake.ping_interval,
                ping_timeout = handshake.ping_timeout,
                "Transport open"
            );
            send_packet(sink, &Packet::connect()).await.is_ok()
        }
        Packet::Ping => send_packet(sink, &Packet::Pong).await.is_ok(),
        Packet::Connect { data, .. } => {
            let sid = data
                .as_ref()
                .and_then(|d| d.get("sid"))
                .and_then(|s| s.as_str())
                .map(str::to_string);
            *connected.write().await = true;
            let _ = event_tx.send(SocketEvent::Connected { sid }).await;
            true
        }
        Packet::ConnectError { data, .. } => {
            let message = data
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("connect refused")
                .to_string();
            error!(reason = %message, "Chat server refused namespace connect");
            let _ = event_tx.send(SocketEvent::Error(message)).await;
            false
        }
        Packet::Event { name, data, .. } => {
            debug!(event = %name, "Event received");
            let _ = event_tx.send(SocketEvent::Event { name, data }).await;
            true
        }
        Packet::Disconnect { .. } | Packet::Close => {
            info!("Chat server ended the session");
            false
        }
        other => {
            debug!(packet = ?other, "Unhandled packet");
            true
        }
    }
}

async fn send_packet<S>(sink: &mut S, packet: &Packet) -> Result<(), ()>
where
    S: Sink<WsMessage> + Unpin,
{
    let frame = codec::encode(packet);
    sink.send(WsMessage::Text(frame.into())).await.map_err(|_| {
        warn!("Failed to write to chat server");
    })
}
