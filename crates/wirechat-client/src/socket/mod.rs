//! Minimal Socket.IO client over a single WebSocket.
//!
//! `SocketClient` is a cheap handle; the stream itself is owned by one
//! background task that speaks Engine.IO v4 / Socket.IO v5 framing, answers
//! server pings, and reports events over an mpsc channel.

mod client;
pub mod codec;
mod connection;
mod types;


pub use client::SocketClient;
#[cfg(test)]
pub(crate) use types::SocketCommand;
pub use types::{SocketConfig, SocketEvent};
