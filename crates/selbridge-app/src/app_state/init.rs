//! Window creation and document view setup.

use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use selbridge_common::{Result, SelbridgeError};
use selbridge_webview::{ContentProvider, DocumentView, ViewConfig};

use super::bounds::fill_window;
use super::core::SelbridgeApp;

impl SelbridgeApp {
    /// Create the window and the document view inside it.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_config = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(window_config.width),
                f64::from(window_config.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        match self.create_view(&window) {
            Ok(view) => {
                if window_config.devtools {
                    view.open_devtools();
                }
                tracing::info!("Document view created for {}", self.document.display());
                self.view = Some(view);
                self.window = Some(window);
                true
            }
            Err(e) => {
                tracing::error!("Failed to create document view: {e}");
                false
            }
        }
    }

    /// Build the document view filling `window`.
    fn create_view(&self, window: &Window) -> Result<DocumentView> {
        let file_name = self
            .document
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SelbridgeError::Other(format!(
                    "document path has no usable file name: {}",
                    self.document.display()
                ))
            })?;

        let url = ContentProvider::url_for(file_name);
        let view_config = ViewConfig::with_url(url).devtools(self.config.window.devtools);
        let bounds = fill_window(window.inner_size());

        self.host
            .create(window, bounds, view_config)
            .map_err(|e| SelbridgeError::WebView(e.to_string()))
    }
}
