//! Full configuration validation.
//!
//! Each check pushes onto a shared error list; the orchestrator joins
//! them into a single `ConfigError`.

mod helpers;


use crate::schema::{EndpointConfig, UiConfig, WirechatConfig};
use wirechat_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WirechatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_endpoint(&mut errors, config);
    validate_ui(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_endpoint(errors: &mut Vec<String>, config: &WirechatConfig) {
    let endpoint = &config.endpoint;
    validate_endpoint_url(errors, &endpoint.url);
    validate_range(
        errors,
        "endpoint.connect_timeout",
        endpoint.connect_timeout,
        1,
        120,
    );
}

fn validate_endpoint_url(errors: &mut Vec<String>, url: &str) {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
                errors.push(format!(
                    "endpoint.url scheme '{}' must be one of {}",
                    parsed.scheme(),
                    ALLOWED_SCHEMES.join(", ")
                ));
            }
            if parsed.host_str().is_none() {
                errors.push("endpoint.url has no host".into());
            }
        }
        Err(e) => errors.push(format!("endpoint.url '{url}' is invalid: {e}")),
    }
}

fn validate_ui(errors: &mut Vec<String>, config: &WirechatConfig) {
    let ui = &config.ui;
    validate_non_empty(errors, "ui.input_key", &ui.input_key);
    validate_non_empty(errors, "ui.display_key", &ui.display_key);
    if !ui.input_key.is_empty() && ui.input_key == ui.display_key {
        errors.push(format!(
            "ui.input_key and ui.display_key must differ (both '{}')",
            ui.input_key
        ));
    }
}

/// Reset every invalid field to its default, keeping the valid ones.
///
/// Returns one message per reset field; an empty list means the config was
/// already valid.
pub fn repair(config: &mut WirechatConfig) -> Vec<String> {
    let mut fixed = Vec::new();
    let endpoint_defaults = EndpointConfig::default();
    let ui_defaults = UiConfig::default();

    let mut url_errors = Vec::new();
    validate_endpoint_url(&mut url_errors, &config.endpoint.url);
    if !url_errors.is_empty() {
        fixed.push(format!(
            "{}; using {}",
            url_errors.join("; "),
            endpoint_defaults.url
        ));
        config.endpoint.url = endpoint_defaults.url;
    }

    let mut timeout_errors = Vec::new();
    validate_range(
        &mut timeout_errors,
        "endpoint.connect_timeout",
        config.endpoint.connect_timeout,
        1,
        120,
    );
    if !timeout_errors.is_empty() {
        fixed.push(format!(
            "{}; using {}",
            timeout_errors.join("; "),
            endpoint_defaults.connect_timeout
        ));
        config.endpoint.connect_timeout = endpoint_defaults.connect_timeout;
    }

    if config.ui.input_key.trim().is_empty() {
        fixed.push(format!("ui.input_key is empty; using '{}'", ui_defaults.input_key));
        config.ui.input_key = ui_defaults.input_key.clone();
    }
    if config.ui.display_key.trim().is_empty() {
        fixed.push(format!("ui.display_key is empty; using '{}'", ui_defaults.display_key));
        config.ui.display_key = ui_defaults.display_key.clone();
    }
    if config.ui.input_key == config.ui.display_key {
        fixed.push(format!(
            "ui.input_key and ui.display_key are both '{}'; using '{}' and '{}'",
            config.ui.input_key, ui_defaults.input_key, ui_defaults.display_key
        ));
        config.ui.input_key = ui_defaults.input_key;
        config.ui.display_key = ui_defaults.display_key;
    }

    fixed
}
