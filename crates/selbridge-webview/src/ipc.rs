//! IPC protocol between the document script and Rust.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the bridge script calls
//!   `window.ipc.postMessage(JSON.stringify({kind, payload}))`, which triggers
//!   the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: Rust calls `webview.evaluate_script(...)` with a script
//!   produced by [`js_call_global`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use selbridge_core::HostCall;

/// Message kind for a remote object call.
pub const KIND_INVOKE: &str = "invoke";
/// Message kind sent once the document side finished its handshake.
pub const KIND_BRIDGE_READY: &str = "bridge_ready";

/// Allowed IPC message kinds from JavaScript.
const ALLOWED_IPC_KINDS: &[&str] = &[KIND_INVOKE, KIND_BRIDGE_READY];

/// Check whether an IPC message kind is in the allowlist.
pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    ALLOWED_IPC_KINDS.contains(&kind)
}

/// Raw envelope posted by the document script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    #[serde(default)]
    pub payload: Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Payload of an `invoke` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeRequest {
    /// Published object the call is addressed to.
    pub object: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// A validated message from the document.
#[derive(Debug, Clone, PartialEq)]
pub enum IpcRequest {
    Invoke(InvokeRequest),
    BridgeReady,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpcRejection {
    #[error("failed to parse IPC envelope")]
    Malformed,

    #[error("unknown IPC kind: {0}")]
    UnknownKind(String),

    #[error("invalid payload for {kind}: {reason}")]
    InvalidPayload { kind: String, reason: String },
}

impl IpcRequest {
    /// Parse and validate a raw IPC body.
    pub fn parse(raw: &str) -> Result<Self, IpcRejection> {
        let msg = IpcMessage::from_json(raw).ok_or(IpcRejection::Malformed)?;

        if !is_ipc_kind_allowed(&msg.kind) {
            return Err(IpcRejection::UnknownKind(msg.kind));
        }

        match msg.kind.as_str() {
            KIND_INVOKE => serde_json::from_value(msg.payload)
                .map(IpcRequest::Invoke)
                .map_err(|e| IpcRejection::InvalidPayload {
                    kind: msg.kind.clone(),
                    reason: e.to_string(),
                }),
            KIND_BRIDGE_READY => Ok(IpcRequest::BridgeReady),
            // Allowlist checked above
            other => Err(IpcRejection::UnknownKind(other.to_string())),
        }
    }
}

/// Generate a JS snippet invoking a global exposed by the document.
///
/// The call is skipped when the global is not defined yet, so a host call
/// that races the handshake is a no-op rather than a page error.
pub fn js_call_global(call: &HostCall) -> String {
    let name = serde_json::to_string(&call.name).unwrap_or_else(|_| "\"\"".to_string());
    let args = serde_json::to_string(&call.args).unwrap_or_else(|_| "[]".to_string());
    format!(
        "(function() {{ var f = window[{name}]; if (typeof f === 'function') {{ f.apply(window, {args}); }} }})();"
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_invoke() {
        let raw = r#"{"kind":"invoke","payload":{"object":"backend","method":"onElementClicked","args":["a"]}}"#;
        let req = IpcRequest::parse(raw).unwrap();
        assert_eq!(
            req,
            IpcRequest::Invoke(InvokeRequest {
                object: "backend".into(),
                method: "onElementClicked".into(),
                args: vec![json!("a")],
            })
        );
    }

    #[test]
    fn invoke_without_args_defaults_to_empty() {
        let raw = r#"{"kind":"invoke","payload":{"object":"backend","method":"ping"}}"#;
        match IpcRequest::parse(raw).unwrap() {
            IpcRequest::Invoke(inv) => assert!(inv.args.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_bridge_ready_with_null_payload() {
        let raw = r#"{"kind":"bridge_ready","payload":null}"#;
        assert_eq!(IpcRequest::parse(raw).unwrap(), IpcRequest::BridgeReady);
    }

    #[test]
    fn parses_bridge_ready_without_payload() {
        assert_eq!(
            IpcRequest::parse(r#"{"kind":"bridge_ready"}"#).unwrap(),
            IpcRequest::BridgeReady
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert_eq!(IpcRequest::parse("not json"), Err(IpcRejection::Malformed));
        assert_eq!(IpcRequest::parse(r#"{"payload":1}"#), Err(IpcRejection::Malformed));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = IpcRequest::parse(r#"{"kind":"eval","payload":"1+1"}"#).unwrap_err();
        assert_eq!(err, IpcRejection::UnknownKind("eval".into()));
    }

    #[test]
    fn rejects_invoke_without_object() {
        let err = IpcRequest::parse(r#"{"kind":"invoke","payload":{"method":"m"}}"#).unwrap_err();
        assert!(matches!(err, IpcRejection::InvalidPayload { ref kind, .. } if kind == "invoke"));
    }

    #[test]
    fn ipc_kind_allowlist_is_case_sensitive() {
        assert!(is_ipc_kind_allowed("invoke"));
        assert!(is_ipc_kind_allowed("bridge_ready"));
        assert!(!is_ipc_kind_allowed("INVOKE"));
        assert!(!is_ipc_kind_allowed("invoke\0"));
        assert!(!is_ipc_kind_allowed(""));
    }

    #[test]
    fn js_call_global_encodes_arguments() {
        let js = js_call_global(&HostCall::highlight("highlightElement", "a\"b"));
        assert!(js.contains(r#"window["highlightElement"]"#));
        assert!(js.contains(r#"f.apply(window, ["a\"b"])"#));
        assert!(js.contains("typeof f === 'function'"));
    }

    #[test]
    fn js_call_global_cannot_break_out_of_string() {
        let js = js_call_global(&HostCall::highlight("highlightElement", "</script>'); alert(1); ('"));
        assert!(js.contains(r#"["</script>'); alert(1); ('"]"#));
    }
}
