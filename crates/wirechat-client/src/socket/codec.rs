//! Text framing for Engine.IO v4 packets carrying Socket.IO v5 packets.
//!
//! Only the WebSocket transport is spoken, so every frame is one packet and
//! there is no payload batching. Binary attachments are not supported.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Default Socket.IO namespace.
pub const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("empty frame")]
    Empty,

    #[error("unknown packet type '{0}'")]
    UnknownType(char),

    #[error("unsupported packet type '{0}'")]
    Unsupported(char),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

impl From<CodecError> for wirechat_common::ChatError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::InvalidUrl(_) => wirechat_common::ChatError::Connection(e.to_string()),
            _ => wirechat_common::ChatError::Protocol(e.to_string()),
        }
    }
}

/// Engine.IO open packet payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: u64,
}

/// One decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    // Engine.IO
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Upgrade,
    Noop,
    // Socket.IO, inside an Engine.IO message
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        id: Option<u64>,
        name: String,
        data: Value,
    },
    Ack {
        namespace: String,
        id: u64,
        data: Value,
    },
    ConnectError {
        namespace: String,
        data: Value,
    },
}

impl Packet {
    /// An event on the default namespace without an ack id.
    pub fn event(name: impl Into<String>, data: Value) -> Self {
        Packet::Event {
            namespace: DEFAULT_NAMESPACE.to_string(),
            id: None,
            name: name.into(),
            data,
        }
    }

    /// A connect request on the default namespace.
    pub fn connect() -> Self {
        Packet::Connect {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data: None,
        }
    }

    /// A disconnect on the default namespace.
    pub fn disconnect() -> Self {
        Packet::Disconnect {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode one text frame.
pub fn decode(frame: &str) -> Result<Packet, CodecError> {
    let mut chars = frame.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let body = chars.as_str();

    match kind {
        // Ping and pong may carry a probe string; it is not needed here.
        '0' => serde_json::from_str(body)
            .map(Packet::Open)
            .map_err(|e| CodecError::Malformed(e.to_string())),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket(body),
        '5' => Ok(Packet::Upgrade),
        '6' => Ok(Packet::Noop),
        other => Err(CodecError::UnknownType(other)),
    }
}

fn decode_socket(body: &str) -> Result<Packet, CodecError> {
    let mut chars = body.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let rest = chars.as_str();

    let (namespace, rest) = split_namespace(rest);
    let (id, json) = split_ack_id(rest);
    let payload = if json.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(json).map_err(|e| CodecError::Malformed(e.to_string()))?)
    };

    match kind {
        '0' => Ok(Packet::Connect { namespace, data: payload }),
        '1' => Ok(Packet::Disconnect { namespace }),
        '2' => {
            let (name, data) = split_event_args(payload)?;
            Ok(Packet::Event {
                namespace,
                id,
                name,
                data,
            })
        }
        '3' => {
            let id = id.ok_or_else(|| CodecError::Malformed("ack without id".into()))?;
            let data = match payload {
                Some(Value::Array(mut args)) if !args.is_empty() => args.swap_remove(0),
                _ => Value::Null,
            };
            Ok(Packet::Ack { namespace, id, data })
        }
        '4' => Ok(Packet::ConnectError {
            namespace,
            data: payload.unwrap_or(Value::Null),
        }),
        '5' | '6' => Err(CodecError::Unsupported(kind)),
        other => Err(CodecError::UnknownType(other)),
    }
}

/// Split a leading `/namespace,` off the packet body.
fn split_namespace(rest: &str) -> (String, &str) {
    if !rest.starts_with('/') {
        return (DEFAULT_NAMESPACE.to_string(), rest);
    }
    match rest.find(',') {
        Some(idx) => (rest[..idx].to_string(), &rest[idx + 1..]),
        None => (rest.to_string(), ""),
    }
}

/// Split leading ack id digits off the packet body.
fn split_ack_id(rest: &str) -> (Option<u64>, &str) {
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return (None, rest);
    }
    (rest[..digits].parse().ok(), &rest[digits..])
}

/// Event payloads are `[name, arg0, ...]`; only the first argument is kept.
fn split_event_args(payload: Option<Value>) -> Result<(String, Value), CodecError> {
    let mut args = match payload {
        Some(Value::Array(args)) => args.into_iter(),
        _ => return Err(CodecError::Malformed("event payload is not an array".into())),
    };
    let name = match args.next() {
        Some(Value::String(name)) => name,
        _ => return Err(CodecError::Malformed("event without a name".into())),
    };
    Ok((name, args.next().unwrap_or(Value::Null)))
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode one packet as a text frame.
pub fn encode(packet: &Packet) -> String {
    match packet {
        Packet::Open(handshake) => {
            format!("0{}", serde_json::to_string(handshake).unwrap_or_default())
        }
        Packet::Close => "1".to_string(),
        Packet::Ping => "2".to_string(),
        Packet::Pong => "3".to_string(),
        Packet::Upgrade => "5".to_string(),
        Packet::Noop => "6".to_string(),
        Packet::Connect { namespace, data } => {
            let body = data.as_ref().map(Value::to_string).unwrap_or_default();
            format!("40{}{body}", namespace_prefix(namespace))
        }
        Packet::Disconnect { namespace } => {
            format!("41{}", namespace_prefix(namespace))
        }
        Packet::Event {
            namespace,
            id,
            name,
            data,
        } => {
            let args = Value::Array(vec![Value::String(name.clone()), data.clone()]);
            let id = id.map(|id| id.to_string()).unwrap_or_default();
            format!("42{}{id}{args}", namespace_prefix(namespace))
        }
        Packet::Ack {
            namespace,
            id,
            data,
        } => {
            let args = Value::Array(vec![data.clone()]);
            format!("43{}{id}{args}", namespace_prefix(namespace))
        }
        Packet::ConnectError { namespace, data } => {
            format!("44{}{data}", namespace_prefix(namespace))
        }
    }
}

/// Custom namespaces are always written as `/ns,`, even with no payload.
fn namespace_prefix(namespace: &str) -> String {
    if namespace == DEFAULT_NAMESPACE {
        String::new()
    } else {
        format!("{namespace},")
    }
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// Build the WebSocket transport URL for a Socket.IO server base URL.
pub fn endpoint_url(base: &str) -> Result<Url, CodecError> {
    let mut url = Url::parse(base).map_err(|e| CodecError::InvalidUrl(format!("{base}: {e}")))?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(CodecError::InvalidUrl(format!("unsupported scheme '{other}'"))),
    };
    url.set_scheme(scheme)
        .map_err(|()| CodecError::InvalidUrl(format!("cannot use scheme '{scheme}' for {base}")))?;
    url.set_path("/socket.io/");
    url.set_query(Some("EIO=4&transport=websocket"));
    Ok(url)
}
