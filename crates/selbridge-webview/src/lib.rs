//! WebView host for documents driven by the selection bridge.
//!
//! Wraps the `wry` crate to provide:
//! - a generated initialization script implementing the document side of the
//!   bridge on top of `window.ipc`
//! - a JSON IPC protocol carrying remote object calls to Rust
//! - host calls back into the document's exposed entry point
//! - a `selbridge://` custom protocol serving the document from disk
//! - a navigation allowlist and page lifecycle events

pub mod content;
pub mod events;
pub mod host;
pub mod ipc;
pub mod script;

pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use host::{Dispatch, DocumentHost, DocumentView, ViewConfig, ViewState};
pub use ipc::{IpcMessage, IpcRejection, IpcRequest, InvokeRequest};
pub use script::bridge_init_script;
