use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures surfaced by a chat session.
///
/// None of these are fatal: the session loop logs them and keeps running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// Handshake or transport failure, or a send attempted before the
    /// connection reached `Connected`.
    #[error("connection error: {0}")]
    Connection(String),

    /// The display surface the reply should be rendered into is absent.
    #[error("render target missing: {0}")]
    RenderTargetMissing(String),

    /// The display surface exists but writing to it failed.
    #[error("surface write failed: {0}")]
    SurfaceWrite(String),

    /// The text field a send reads from is absent.
    #[error("input field missing: {0}")]
    InputMissing(String),

    /// Reserved for input validation. Empty input is accepted, so nothing
    /// raises this today.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed frame or payload from the server.
    #[error("protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WirechatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
