mod cli;
mod terminal;

use std::io::Stdout;
use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};
use wirechat_client::{ChatSession, SessionConfig};
use wirechat_config::WirechatConfig;

use crate::cli::Args;
use crate::terminal::TerminalSurface;

const DEFAULT_DIRECTIVE: &str = "wirechat=info";

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| DEFAULT_DIRECTIVE.parse().unwrap()),
    )
}

/// The config's log level applies only when `--log-level` was not given.
fn config_directive(args: &Args, config: &WirechatConfig) -> Option<&'static str> {
    match args.log_level {
        Some(_) => None,
        None => Some(config.logging.level.directive()),
    }
}

/// Map the loaded config onto the session's own settings.
fn session_config(config: &WirechatConfig) -> SessionConfig {
    SessionConfig {
        connect_timeout: Duration::from_secs(u64::from(config.endpoint.connect_timeout)),
        input_key: config.ui.input_key.clone(),
        display_key: config.ui.display_key.clone(),
        reply_prefix: config.ui.reply_prefix.clone(),
    }
}

/// Drive the session until stdin closes or Ctrl-C.
///
/// A failed or dropped connection does not end the loop: the session goes
/// inert and every send is refused with a logged error.
async fn run(session: &mut ChatSession<TerminalSurface<Stdout>>) -> wirechat_common::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events_open = true;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        session.surface_mut().set_input(line);
                        if let Err(e) = session.send_current_input().await {
                            tracing::warn!("Send failed: {e}");
                        }
                    }
                    None => {
                        tracing::debug!("stdin closed");
                        break;
                    }
                }
            }

            event = session.next_event(), if events_open => {
                match event {
                    Some(event) => {
                        if let Err(e) = session.handle_event(event) {
                            tracing::error!("{e}");
                        }
                    }
                    None => events_open = false,
                }
            }

            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // Initialize logging; the config's level is swapped in once it is read.
    let log_directive = args.log_level.as_deref().unwrap_or(DEFAULT_DIRECTIVE);
    let (filter, filter_handle) = reload::Layer::new(env_filter(log_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("wirechat v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = wirechat_config::load_config(args.config.as_deref().map(Path::new))
        .unwrap_or_else(|e| {
            tracing::warn!("Config load failed, using defaults: {e}");
            WirechatConfig::default()
        });
    if let Some(directive) = config_directive(&args, &config) {
        if let Err(e) = filter_handle.reload(env_filter(directive)) {
            tracing::warn!("Failed to apply configured log level: {e}");
        }
    }
    tracing::info!("Config loaded (endpoint: {})", config.endpoint.url);

    let session_config = session_config(&config);
    let surface = TerminalSurface::new(
        &session_config.input_key,
        &session_config.display_key,
        std::io::stdout(),
    );
    let mut session = ChatSession::new(session_config, surface);
    session.connect(&config.endpoint.url);

    if let Err(e) = run(&mut session).await {
        tracing::error!("Input loop error: {e}");
    }

    session.close().await;
    tracing::info!("Shutdown complete");
}
