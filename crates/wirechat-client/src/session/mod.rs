//! Chat session: one connection, one text field, one display container.
//!
//! The session is driven by a single task that feeds it socket events via
//! [`ChatSession::handle_event`]. The reply handler is registered once and
//! replaced, never stacked, by [`ChatSession::on_reply`].

mod chat_session;
mod types;

#[cfg(test)]
mod tests;

pub use chat_session::ChatSession;
pub use types::{ReplyHandler, SessionConfig, SessionState};
