//! Selection synchronization between a rendered document and a native host.
//!
//! The document side of the bridge has three parts:
//! - a channel initializer that resolves the host's remote object once
//! - a click router that reports the nearest identified element to it
//! - a highlight synchronizer the host calls back to move the selection
//!
//! [`Page`] wires them into a headless document environment; the webview
//! crate reuses the same contracts ([`RemoteObject`], [`HostCall`]) on the
//! host side of a real browser engine.

pub mod bridge;
pub mod channel;
pub mod dispatch;
pub mod document;
pub mod event;
pub mod highlight;
pub mod page;
pub mod resolve;
pub mod router;

pub use bridge::Bridge;
pub use channel::{
    open_channel, LocalChannel, NoTransport, RemoteObject, RemoteProxy, Transport,
    TransportProvider,
};
pub use dispatch::{EntryPoints, HostCall, HostSurface};
pub use document::{Document, DomTree, NodeId};
pub use event::InteractionEvent;
pub use highlight::{HighlightSynchronizer, SelectionState};
pub use page::Page;
pub use resolve::closest_identified;
pub use router::ClickRouter;
