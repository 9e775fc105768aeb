//! Host-callable entry points.
//!
//! The bridge keeps a table of named entry points the host may invoke.
//! Exposing them to the host's global scope is a separate step performed
//! through a [`HostSurface`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::document::Document;
use crate::highlight::HighlightSynchronizer;

/// A call from the host into the document: a global name plus arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl HostCall {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A highlight request for `id` through the entry point `entry_point`.
    pub fn highlight(entry_point: impl Into<String>, id: &str) -> Self {
        Self::new(entry_point, vec![Value::String(id.to_string())])
    }
}

/// Where the bridge registers its globally reachable names.
pub trait HostSurface {
    fn expose(&mut self, name: &str);
}

pub type EntryPoint<D> = fn(&mut HighlightSynchronizer, &mut D, &[Value]);

/// Dispatch table of host-callable entry points.
pub struct EntryPoints<D: Document> {
    table: BTreeMap<String, EntryPoint<D>>,
}

impl<D: Document> EntryPoints<D> {
    pub fn new() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Table holding only the highlight entry point under `name`.
    pub fn with_highlight(name: &str) -> Self {
        let mut entries = Self::new();
        entries.register(name, highlight_entry::<D>);
        entries
    }

    pub fn register(&mut self, name: impl Into<String>, entry: EntryPoint<D>) {
        self.table.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<EntryPoint<D>> {
        self.table.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<D: Document> Default for EntryPoints<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> fmt::Debug for EntryPoints<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

/// Text a host argument stands for when used as an identifier.
///
/// Strings are taken as is, numbers and booleans by their textual form.
/// Anything else can never name an element.
pub fn identifier_arg(args: &[Value]) -> Option<String> {
    match args.first()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text of a number as the document's `String(n)` renders it: integral
/// floats lose their fraction and negative zero prints as `0`.
fn number_text(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    Some(if f == 0.0 { "0".to_string() } else { f.to_string() })
}

fn highlight_entry<D: Document>(sync: &mut HighlightSynchronizer, doc: &mut D, args: &[Value]) {
    match identifier_arg(args) {
        Some(id) => {
            sync.highlight(doc, &id);
        }
        None => {
            tracing::debug!(argc = args.len(), "highlight called without identifier");
            sync.clear(doc);
        }
    }
}
