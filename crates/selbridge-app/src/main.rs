mod app_state;
mod backend;
mod cli;

use std::path::{Path, PathBuf};

use selbridge_common::{Result, SelbridgeError};
use selbridge_config::SelbridgeConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

const DEFAULT_LOG_DIRECTIVE: &str = "selbridge=info";

fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Load config before logging so its level can apply; report afterwards
    let loaded = selbridge_config::load_config_from(args.config.as_deref());

    // Initialize logging: --log-level, then config, then default
    let log_directive = args
        .log_directive()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.directive()))
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string());
    let directive: Directive = log_directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("Selection bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        SelbridgeConfig::default()
    });

    if let Err(e) = run(&args, config) {
        tracing::error!("Failed to host {}: {e}", args.document.display());
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

fn run(args: &cli::Args, config: SelbridgeConfig) -> Result<()> {
    let document = resolve_document(&args.document)?;

    let event_loop = EventLoop::new()
        .map_err(|e| SelbridgeError::Other(format!("failed to create event loop: {e}")))?;
    let mut app = app_state::SelbridgeApp::new(config, document, !args.no_echo);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| SelbridgeError::Other(format!("event loop error: {e}")))
}

/// Canonical path of the document to host. It must be a regular file.
fn resolve_document(path: &Path) -> Result<PathBuf> {
    let canonical = std::fs::canonicalize(path)?;
    if !canonical.is_file() {
        return Err(SelbridgeError::Other(format!(
            "not a file: {}",
            canonical.display()
        )));
    }
    Ok(canonical)
}
