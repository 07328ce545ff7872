//! wirechat configuration.
//!
//! TOML-based configuration with serde defaults so partial configs work
//! out of the box.
//!
//! ```rust,no_run
//! use wirechat_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.endpoint.url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::WirechatConfig;

use std::path::Path;
use tracing::warn;
use wirechat_common::ConfigError;

/// Load config from `path` if given, otherwise from the platform default
/// path (creating it on first run).
///
/// Invalid values are logged and reset to their defaults; the rest of the
/// file is kept. Only a missing override file or unparseable TOML is an
/// error.
pub fn load_config(path: Option<&Path>) -> Result<WirechatConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    for fix in validation::repair(&mut config) {
        warn!("config: {fix}");
    }
    Ok(config)
}
