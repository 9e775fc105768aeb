//! Channel transport and remote object resolution.
//!
//! The host supplies a transport before the document's scripts run. The
//! bridge borrows it exactly once, at document-ready, to resolve a single
//! named remote object; afterwards only the resolved [`RemoteProxy`] is kept.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use selbridge_common::BridgeError;

/// A native-side object reachable through the channel.
///
/// Calls are one-way: nothing is returned and the caller never waits on
/// the outcome.
pub trait RemoteObject {
    fn invoke(&self, method: &str, args: &[Value]);
}

impl<F> RemoteObject for F
where
    F: Fn(&str, &[Value]),
{
    fn invoke(&self, method: &str, args: &[Value]) {
        self(method, args)
    }
}

/// Connection to the host able to resolve named objects.
///
/// Resolution may complete later than the request; until it does the
/// bridge stays unregistered.
#[async_trait(?Send)]
pub trait Transport {
    async fn resolve(&self, name: &str) -> Option<Rc<dyn RemoteObject>>;
}

/// Source of the host transport. `None` means the host did not inject one.
pub trait TransportProvider {
    fn transport(&self) -> Option<&dyn Transport>;
}

/// Provider for documents loaded outside a bridging host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransport;

impl TransportProvider for NoTransport {
    fn transport(&self) -> Option<&dyn Transport> {
        None
    }
}

/// In-process channel holding objects published by the host.
#[derive(Default)]
pub struct LocalChannel {
    objects: BTreeMap<String, Rc<dyn RemoteObject>>,
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an object under `name`, replacing any previous one.
    pub fn publish(&mut self, name: impl Into<String>, object: Rc<dyn RemoteObject>) {
        let name = name.into();
        debug!(object = %name, "object published on channel");
        self.objects.insert(name, object);
    }

    /// Synchronous lookup, for hosts dispatching calls that arrive by name.
    pub fn get(&self, name: &str) -> Option<Rc<dyn RemoteObject>> {
        self.objects.get(name).cloned()
    }

    /// Names of all published objects, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Debug for LocalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalChannel")
            .field("objects", &self.objects.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait(?Send)]
impl Transport for LocalChannel {
    async fn resolve(&self, name: &str) -> Option<Rc<dyn RemoteObject>> {
        self.get(name)
    }
}

impl TransportProvider for LocalChannel {
    fn transport(&self) -> Option<&dyn Transport> {
        Some(self)
    }
}

/// Local handle to the resolved remote object.
#[derive(Clone)]
pub struct RemoteProxy {
    name: String,
    object: Rc<dyn RemoteObject>,
}

impl RemoteProxy {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward a call to the remote object without waiting for any outcome.
    pub fn call(&self, method: &str, args: &[Value]) {
        debug!(object = %self.name, method, argc = args.len(), "remote call");
        self.object.invoke(method, args);
    }
}

impl fmt::Debug for RemoteProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteProxy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Acquire the host transport and resolve `object_name` through it.
pub async fn open_channel(
    provider: &dyn TransportProvider,
    object_name: &str,
) -> Result<RemoteProxy, BridgeError> {
    let transport = provider.transport().ok_or_else(|| {
        BridgeError::TransportUnavailable("host did not provide a channel transport".into())
    })?;

    let object = transport
        .resolve(object_name)
        .await
        .ok_or_else(|| BridgeError::ObjectNotFound(object_name.to_string()))?;

    Ok(RemoteProxy {
        name: object_name.to_string(),
        object,
    })
}
