use std::rc::Rc;

use tracing::{debug, info};

use selbridge_common::{BridgeError, BridgeOptions, ElementId};

use crate::channel::{open_channel, RemoteProxy, TransportProvider};
use crate::dispatch::{EntryPoints, HostCall, HostSurface};
use crate::document::Document;
use crate::event::InteractionEvent;
use crate::highlight::{HighlightSynchronizer, SelectionState};
use crate::router::ClickRouter;

/// A fully initialized selection bridge.
///
/// A `Bridge` only exists once the channel handshake succeeded, so holding
/// one means the remote proxy is resolved and both the router and the
/// highlight entry point are live.
pub struct Bridge<D: Document> {
    proxy: Rc<RemoteProxy>,
    router: ClickRouter,
    synchronizer: HighlightSynchronizer,
    entry_points: EntryPoints<D>,
}

impl<D: Document> Bridge<D> {
    /// Run the channel handshake.
    ///
    /// The provider is borrowed only for the duration of this call. Failure
    /// leaves nothing registered.
    pub async fn initialize(
        provider: &dyn TransportProvider,
        options: &BridgeOptions,
    ) -> Result<Self, BridgeError> {
        let proxy = Rc::new(open_channel(provider, &options.object_name).await?);
        debug!(object = %proxy.name(), "remote object resolved");

        Ok(Self {
            router: ClickRouter::new(Rc::clone(&proxy), options),
            synchronizer: HighlightSynchronizer::new(options),
            entry_points: EntryPoints::with_highlight(&options.entry_point),
            proxy,
        })
    }

    /// Register every entry point on the host's global surface.
    pub fn expose(&self, surface: &mut dyn HostSurface) {
        for name in self.entry_points.names() {
            surface.expose(name);
        }
        info!(
            object = %self.proxy.name(),
            entry_points = self.entry_points.len(),
            "Bridge setup complete. Ready to communicate."
        );
    }

    /// Route one interaction event.
    pub fn on_interaction(
        &self,
        doc: &D,
        event: &mut InteractionEvent<D::Node>,
    ) -> Option<ElementId> {
        self.router.handle(doc, event)
    }

    /// Dispatch a host call through the entry point table.
    pub fn invoke(&mut self, doc: &mut D, call: &HostCall) -> Result<(), BridgeError> {
        let entry = self
            .entry_points
            .get(&call.name)
            .ok_or_else(|| BridgeError::UndefinedSymbol(call.name.clone()))?;
        entry(&mut self.synchronizer, doc, &call.args);
        Ok(())
    }

    pub fn selection(&self) -> &SelectionState {
        self.synchronizer.selection()
    }

    pub fn proxy(&self) -> &RemoteProxy {
        &self.proxy
    }

    pub fn entry_points(&self) -> &EntryPoints<D> {
        &self.entry_points
    }
}
