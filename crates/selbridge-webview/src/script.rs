//! Document-side half of the selection bridge.
//!
//! The script is injected as an initialization script, so it runs before the
//! document's own scripts. On document-ready it checks for the `window.ipc`
//! transport, resolves the configured object among the names the host
//! published, then registers the click listener and exposes the highlight
//! entry point. Any failure leaves the document untouched.

use selbridge_common::BridgeOptions;

const OPTIONS_PLACEHOLDER: &str = "__SELBRIDGE_OPTIONS__";
const OBJECTS_PLACEHOLDER: &str = "__SELBRIDGE_OBJECTS__";

const BRIDGE_TEMPLATE: &str = r#"
(function() {
    'use strict';

    var OPTIONS = __SELBRIDGE_OPTIONS__;
    var PUBLISHED = __SELBRIDGE_OBJECTS__;

    function post(transport, kind, payload) {
        transport.postMessage(JSON.stringify({
            kind: kind,
            payload: payload === undefined ? null : payload
        }));
    }

    function makeProxy(transport, objectName) {
        return new Proxy({}, {
            get: function(_target, method) {
                if (typeof method !== 'string') {
                    return undefined;
                }
                return function() {
                    post(transport, 'invoke', {
                        object: objectName,
                        method: method,
                        args: Array.prototype.slice.call(arguments)
                    });
                };
            }
        });
    }

    // Resolution completes asynchronously, like a channel handshake.
    function openChannel(transport, onReady) {
        var objects = {};
        PUBLISHED.forEach(function(name) {
            objects[name] = makeProxy(transport, name);
        });
        Promise.resolve().then(function() {
            onReady({ objects: objects });
        });
    }

    function findById(id) {
        var selector = '[' + OPTIONS.id_attribute + '="' + CSS.escape(String(id)) + '"]';
        return document.querySelector(selector);
    }

    function setup() {
        var transport = window.ipc;
        if (typeof transport === 'undefined' || transport === null ||
                typeof transport.postMessage !== 'function') {
            console.error('Channel transport is not available. The document is not hosted by selbridge.');
            return;
        }

        openChannel(transport, function(channel) {
            var backend = channel.objects[OPTIONS.object_name];
            if (!backend) {
                console.error('Remote object "' + OPTIONS.object_name + '" not found on channel.');
                return;
            }

            var currentSelectedId = null;

            document.body.addEventListener('click', function(event) {
                event.preventDefault();
                event.stopPropagation();

                var target = event.target;
                if (target && target.nodeType !== 1) {
                    target = target.parentElement;
                }
                if (!target || typeof target.closest !== 'function') {
                    return;
                }

                var elementWithId = target.closest('[' + OPTIONS.id_attribute + ']');
                if (elementWithId) {
                    backend[OPTIONS.click_method](elementWithId.getAttribute(OPTIONS.id_attribute));
                }
            });

            window[OPTIONS.entry_point] = function(elementId) {
                if (currentSelectedId !== null) {
                    var oldSelected = findById(currentSelectedId);
                    if (oldSelected) {
                        oldSelected.classList.remove(OPTIONS.marker_class);
                    }
                }
                currentSelectedId = null;

                var usable = typeof elementId === 'string' ||
                    typeof elementId === 'number' ||
                    typeof elementId === 'boolean';
                var newSelected = usable ? findById(elementId) : null;
                if (newSelected) {
                    newSelected.classList.add(OPTIONS.marker_class);
                    currentSelectedId = String(elementId);
                }
            };

            post(transport, 'bridge_ready', null);
            console.log('Bridge setup complete. Ready to communicate.');
        });
    }

    if (document.readyState === 'loading') {
        document.addEventListener('DOMContentLoaded', setup);
    } else {
        setup();
    }
})();
"#;

/// Build the initialization script for `options`.
///
/// `published` lists the object names the host serves; resolving any other
/// name on the document side yields nothing. Every templated value is JSON
/// encoded, so names cannot escape their string literals.
pub fn bridge_init_script<'a>(
    options: &BridgeOptions,
    published: impl IntoIterator<Item = &'a str>,
) -> String {
    let published: Vec<&str> = published.into_iter().collect();
    let options_json = serde_json::to_string(options).unwrap_or_else(|_| "{}".to_string());
    let objects_json = serde_json::to_string(&published).unwrap_or_else(|_| "[]".to_string());

    BRIDGE_TEMPLATE
        .replace(OPTIONS_PLACEHOLDER, &options_json)
        .replace(OBJECTS_PLACEHOLDER, &objects_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_replaced() {
        let js = bridge_init_script(&BridgeOptions::default(), ["backend"]);
        assert!(!js.contains(OPTIONS_PLACEHOLDER));
        assert!(!js.contains(OBJECTS_PLACEHOLDER));
        assert!(js.contains(r#"var PUBLISHED = ["backend"];"#));
    }

    #[test]
    fn options_are_embedded_as_json() {
        let js = bridge_init_script(&BridgeOptions::default(), ["backend"]);
        assert!(js.contains(r#""object_name":"backend""#));
        assert!(js.contains(r#""click_method":"onElementClicked""#));
        assert!(js.contains(r#""entry_point":"highlightElement""#));
        assert!(js.contains(r#""id_attribute":"data-element-id""#));
        assert!(js.contains(r#""marker_class":"selected-element""#));
    }

    #[test]
    fn no_published_objects_yields_empty_list() {
        let js = bridge_init_script(&BridgeOptions::default(), std::iter::empty());
        assert!(js.contains("var PUBLISHED = [];"));
    }

    #[test]
    fn hostile_names_stay_inside_string_literals() {
        let options = BridgeOptions {
            object_name: "x\"];alert(1);//".into(),
            ..Default::default()
        };
        let js = bridge_init_script(&options, ["a\"b"]);
        assert!(js.contains(r#""object_name":"x\"];alert(1);//""#));
        assert!(js.contains(r#"["a\"b"]"#));
    }

    #[test]
    fn aborts_before_registration_when_transport_missing() {
        let js = bridge_init_script(&BridgeOptions::default(), ["backend"]);
        let check = js.find("typeof transport.postMessage").unwrap();
        let listener = js.find("addEventListener('click'").unwrap();
        let entry = js.find("window[OPTIONS.entry_point]").unwrap();
        assert!(check < listener);
        assert!(check < entry);
    }

    #[test]
    fn click_listener_suppresses_before_resolving() {
        let js = bridge_init_script(&BridgeOptions::default(), ["backend"]);
        let prevent = js.find("event.preventDefault()").unwrap();
        let stop = js.find("event.stopPropagation()").unwrap();
        let closest = js.find("target.closest(").unwrap();
        assert!(prevent < closest);
        assert!(stop < closest);
    }

    #[test]
    fn entry_point_clears_before_looking_up_new_id() {
        let js = bridge_init_script(&BridgeOptions::default(), ["backend"]);
        let entry = js.find("window[OPTIONS.entry_point]").unwrap();
        let body = &js[entry..];
        let remove = body.find("classList.remove(OPTIONS.marker_class)").unwrap();
        let reset = body.find("currentSelectedId = null;").unwrap();
        let lookup = body.find("findById(elementId)").unwrap();
        let add = body.find("classList.add(OPTIONS.marker_class)").unwrap();
        let track = body.find("currentSelectedId = String(elementId)").unwrap();
        assert!(remove < reset && reset < lookup && lookup < add && add < track);
        assert!(body.contains("if (currentSelectedId !== null)"));
    }

    #[test]
    fn ready_message_follows_registration() {
        let js = bridge_init_script(&BridgeOptions::default(), ["backend"]);
        let entry = js.find("window[OPTIONS.entry_point]").unwrap();
        let ready = js.find("'bridge_ready'").unwrap();
        assert!(entry < ready);
    }
}
