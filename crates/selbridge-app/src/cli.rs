use std::path::PathBuf;

use clap::Parser;

/// Selection bridge: open an HTML document and keep its selection in sync
/// with the native host.
#[derive(Parser, Debug)]
#[command(name = "selbridge", version, about)]
pub struct Args {
    /// HTML document to open. Files next to it are served as its assets.
    pub document: PathBuf,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Only log clicks; do not highlight the clicked element back.
    #[arg(long)]
    pub no_echo: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// `EnvFilter` directive from `--log-level`, if given.
    pub fn log_directive(&self) -> Option<String> {
        self.log_level
            .as_deref()
            .map(|level| format!("selbridge={level}"))
    }
}
