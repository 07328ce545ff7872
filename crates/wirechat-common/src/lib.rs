pub mod errors;

pub use errors::{ChatError, ConfigError, WirechatError};

pub type Result<T> = std::result::Result<T, WirechatError>;
