pub mod protocol;
pub mod session;
pub mod socket;
pub mod surface;

pub use protocol::{HistoryTurn, InboundMessage, OutboundMessage};
pub use session::{ChatSession, SessionConfig, SessionState};
pub use socket::{SocketClient, SocketConfig, SocketEvent};
pub use surface::{escape_html, Document, Element, Surface};
