use clap::Parser;

/// wirechat: a terminal client for a Socket.IO chat bot.
///
/// Each line typed on stdin is sent as a message; replies are printed as
/// they arrive.
#[derive(Parser, Debug)]
#[command(name = "wirechat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
