//! Event pumping for the document view.

use std::time::{Duration, Instant};

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use selbridge_webview::WebViewEvent;

use super::core::SelbridgeApp;

/// How often to pump document events (approx 60 Hz).
const POLL_INTERVAL: Duration = Duration::from_millis(16);

impl SelbridgeApp {
    /// Pump document events and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_document_events();
            self.flush_echo();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn poll_document_events(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        for event in self.host.pump(view) {
            match event {
                WebViewEvent::TitleChanged { title } => {
                    if let Some(window) = &self.window {
                        if !title.is_empty() {
                            window.set_title(&title);
                        }
                    }
                }
                WebViewEvent::PageLoad { state, url } => {
                    tracing::info!(?state, url = %url, "Document load");
                }
                _ => {}
            }
        }
    }

    /// Highlight clicked elements back in the document.
    fn flush_echo(&mut self) {
        let (Some(view), Some(queue)) = (&self.view, &self.echo) else {
            return;
        };

        let pending: Vec<_> = queue.borrow_mut().drain(..).collect();
        for id in pending {
            if let Err(e) = view.highlight(id.as_str()) {
                tracing::warn!(id = %id, "Failed to highlight element: {e}");
            }
        }
    }
}
