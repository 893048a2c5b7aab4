// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The event bridge between the host OS and the native messenger core.
//
// Outbound: structured `BridgeEvent`s are serialized to the numeric-code /
// JSON-payload protocol and delivered synchronously into the core's
// callback entry point. A payload that fails to serialize is dropped with
// a warning — the core tolerates missed events; the bridge never crashes
// the host process on malformed cross-boundary data.
//
// Inbound: a set of synchronous, stateless query operations the core can
// call at any time. Each delegates to the platform host and degrades to a
// harmless default on failure.
//
// The bridge is constructed once at process start and handed by reference
// to the components that need it (permission negotiator, keyboard monitor,
// push router). There is no ambient singleton.

use serde::Deserialize;
use tracing::{debug, warn};

use funkwerk_core::config::BridgeConfig;
use funkwerk_core::event::BridgeEvent;
use funkwerk_core::types::NotificationSpec;

use crate::phone::format_phone_number;
use crate::traits::PlatformHost;

/// The native core's synchronous callback entry point.
///
/// Dispatched on the host main thread, never concurrently for a given
/// bridge instance.
pub trait CoreSink {
    fn on_native_event(&self, code: i32, payload: &str);
}

/// Expected shape of a native-core notification request payload.
#[derive(Deserialize)]
struct NotificationContent {
    title: String,
    text: String,
}

/// Bridge instance owning the core callback, the platform host, and the
/// bridge configuration.
pub struct EventBridge {
    sink: Box<dyn CoreSink>,
    host: Box<dyn PlatformHost>,
    config: BridgeConfig,
}

impl EventBridge {
    pub fn new(sink: Box<dyn CoreSink>, host: Box<dyn PlatformHost>, config: BridgeConfig) -> Self {
        debug!(platform = host.platform_name(), "event bridge constructed");
        Self { sink, host, config }
    }

    /// The platform host backing this bridge.
    pub fn host(&self) -> &dyn PlatformHost {
        self.host.as_ref()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Deliver an event to the native core.
    ///
    /// Serialization failures are logged and swallowed; the event is
    /// dropped and nothing reaches the core.
    pub fn emit(&self, event: &BridgeEvent) {
        let payload = match event.payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(code = event.code(), error = %e, "dropping event: payload serialization failed");
                return;
            }
        };
        self.sink.on_native_event(event.code(), &payload);
    }

    // -- Query surface (native core → OS) ------------------------------------

    /// The device's own phone number, or the empty string when the query
    /// fails or the SIM exposes none.
    pub fn phone_number(&self) -> String {
        match self.host.phone_number() {
            Ok(Some(number)) => number,
            Ok(None) => String::new(),
            Err(e) => {
                warn!(error = %e, "phone number query failed");
                String::new()
            }
        }
    }

    /// The full contact list as a JSON object mapping display name to the
    /// list of that contact's phone numbers. Rows sharing a display name
    /// merge their numbers; insertion order is preserved. Returns `{}`
    /// when the provider query fails.
    pub fn contacts_json(&self) -> String {
        let rows = match self.host.contact_rows() {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "contacts query failed");
                return "{}".into();
            }
        };

        let mut contacts = serde_json::Map::new();
        for row in rows {
            let numbers = contacts
                .entry(row.name)
                .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            if let serde_json::Value::Array(list) = numbers {
                list.push(serde_json::Value::String(row.number));
            }
        }

        serde_json::Value::Object(contacts).to_string()
    }

    /// Normalize a phone number to `+<country><digits>` form using the
    /// configured country calling code. Returns None for input that is
    /// not a phone number.
    pub fn normalize_phone_number(&self, input: &str) -> Option<String> {
        format_phone_number(input, &self.config.country_calling_code)
    }

    /// Status bar height in pixels, zero when unavailable.
    pub fn status_bar_height(&self) -> i32 {
        match self.host.status_bar_height() {
            Ok(height) => height,
            Err(e) => {
                warn!(error = %e, "status bar height lookup failed, using 0");
                0
            }
        }
    }

    /// Send the host app's task to the background.
    pub fn send_to_background(&self) {
        if let Err(e) = self.host.send_to_back() {
            warn!(error = %e, "send to back failed");
        }
    }

    /// Render a notification from a native-core request: a type code plus
    /// a JSON-encoded `{title, text}` payload. A malformed payload is
    /// dropped with a warning.
    pub fn show_notification(&self, type_code: i32, payload_json: &str) {
        let content: NotificationContent = match serde_json::from_str(payload_json) {
            Ok(content) => content,
            Err(e) => {
                warn!(type_code, error = %e, "dropping notification request: malformed payload");
                return;
            }
        };
        self.notify(NotificationSpec {
            type_code,
            title: content.title,
            text: content.text,
        });
    }

    /// Hand a ready notification to the OS subsystem. Shared by the query
    /// surface and the inbound push router.
    pub(crate) fn notify(&self, spec: NotificationSpec) {
        if let Err(e) = self.host.show_notification(&spec) {
            warn!(type_code = spec.type_code, error = %e, "notification render failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bridge_with, FakeHost};
    use funkwerk_core::types::ContactRow;

    #[test]
    fn emit_delivers_code_and_payload() {
        let (bridge, events) = bridge_with(FakeHost::default());

        bridge.emit(&BridgeEvent::KeyboardShown {
            height: 700,
            delta: 300,
        });

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 3000);
        let payload: serde_json::Value = serde_json::from_str(&events[0].1).expect("json");
        assert_eq!(payload, serde_json::json!({"height": 700, "delta": 300}));
    }

    #[test]
    fn phone_number_degrades_to_empty_string() {
        let (bridge, _) = bridge_with(FakeHost::default());
        assert_eq!(bridge.phone_number(), "");

        let (bridge, _) = bridge_with(FakeHost {
            phone: Some("+49171123456".into()),
            ..FakeHost::default()
        });
        assert_eq!(bridge.phone_number(), "+49171123456");
    }

    #[test]
    fn contacts_merge_duplicate_names_in_insertion_order() {
        let (bridge, _) = bridge_with(FakeHost {
            rows: vec![
                ContactRow {
                    name: "Alice".into(),
                    number: "+491711111111".into(),
                },
                ContactRow {
                    name: "Bob".into(),
                    number: "+442012345678".into(),
                },
                ContactRow {
                    name: "Alice".into(),
                    number: "+492221111111".into(),
                },
            ],
            ..FakeHost::default()
        });

        // Key order must match first-seen order, and Alice's two numbers
        // must merge into one list.
        assert_eq!(
            bridge.contacts_json(),
            r#"{"Alice":["+491711111111","+492221111111"],"Bob":["+442012345678"]}"#
        );
    }

    #[test]
    fn contacts_empty_provider_yields_empty_object() {
        let (bridge, _) = bridge_with(FakeHost::default());
        assert_eq!(bridge.contacts_json(), "{}");
    }

    #[test]
    fn normalize_phone_number_uses_configured_country_code() {
        let (bridge, _) = bridge_with(FakeHost::default());
        assert_eq!(
            bridge.normalize_phone_number("0171 123456").as_deref(),
            Some("+49171123456")
        );
        assert_eq!(bridge.normalize_phone_number("not a number"), None);
    }

    #[test]
    fn status_bar_height_degrades_to_zero() {
        let (bridge, _) = bridge_with(FakeHost::default());
        assert_eq!(bridge.status_bar_height(), 0);

        let (bridge, _) = bridge_with(FakeHost {
            status_bar_height: Some(63),
            ..FakeHost::default()
        });
        assert_eq!(bridge.status_bar_height(), 63);
    }

    #[test]
    fn show_notification_renders_well_formed_payload() {
        let host = FakeHost::default();
        let notifications = host.notifications.clone();
        let (bridge, _) = bridge_with(host);

        bridge.show_notification(1, r#"{"title":"Contact request from Alice","text":""}"#);

        let rendered = notifications.borrow();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].type_code, 1);
        assert_eq!(rendered[0].title, "Contact request from Alice");
        assert_eq!(rendered[0].text, "");
    }

    #[test]
    fn show_notification_drops_malformed_payload() {
        let host = FakeHost::default();
        let notifications = host.notifications.clone();
        let (bridge, _) = bridge_with(host);

        bridge.show_notification(1, "not json");
        bridge.show_notification(1, r#"{"title":"missing text"}"#);

        assert!(notifications.borrow().is_empty());
    }
}
