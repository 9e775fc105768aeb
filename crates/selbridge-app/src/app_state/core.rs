//! SelbridgeApp struct definition and constructor.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use winit::window::Window;

use selbridge_config::SelbridgeConfig;
use selbridge_webview::{ContentProvider, DocumentHost, DocumentView};

use crate::backend::{EchoQueue, SelectionBackend};

/// Top-level application state.
pub struct SelbridgeApp {
    pub(super) config: SelbridgeConfig,
    /// Canonical path of the hosted document.
    pub(super) document: PathBuf,
    pub(super) host: DocumentHost,
    /// Clicked ids to highlight back; `None` with `--no-echo`.
    pub(super) echo: Option<EchoQueue>,

    // Declared before `window` so the WebView is dropped first.
    pub(super) view: Option<DocumentView>,
    pub(super) window: Option<Window>,

    pub(super) last_poll: Instant,
}

impl SelbridgeApp {
    pub fn new(config: SelbridgeConfig, document: PathBuf, echo: bool) -> Self {
        let options = config.bridge.to_options();
        let mut host = DocumentHost::new(options.clone());

        let echo = echo.then(EchoQueue::default);
        let backend = SelectionBackend::new(options.click_method.clone(), echo.clone());
        host.publish(options.object_name.clone(), Rc::new(backend));

        let base_dir = document
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::info!("Serving document assets from {}", base_dir.display());
        host.set_content_provider(ContentProvider::new(base_dir));

        Self {
            config,
            document,
            host,
            echo,
            view: None,
            window: None,
            last_poll: Instant::now(),
        }
    }
}
