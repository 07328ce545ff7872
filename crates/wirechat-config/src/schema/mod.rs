//! Configuration schema types for wirechat.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod endpoint;
mod system;
mod ui;

pub use endpoint::*;
pub use system::*;
pub use ui::*;

use serde::{Deserialize, Serialize};

/// Root configuration for wirechat.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WirechatConfig {
    pub endpoint: EndpointConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}
