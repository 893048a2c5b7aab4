// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inbound push-message router.
//
// Classifies push payloads by their string-encoded type code and renders
// them as local notifications through the bridge. Malformed or
// unrecognized messages are dropped, never surfaced — push payloads cross
// a trust boundary and must not be able to crash the host process.

use std::collections::HashMap;

use tracing::debug;

use funkwerk_core::types::{NotificationSpec, PushKind};

use crate::event_bridge::EventBridge;

/// Stateless consumer of inbound push messages.
pub struct PushRouter;

impl PushRouter {
    /// Consume one push message's data fields.
    ///
    /// An empty message is a no-op. A recognized type code renders one
    /// notification whose id is the type code, so a newer notification of
    /// the same kind replaces the older one. `numElements` defaults to 0
    /// when missing or unparseable.
    pub fn on_message(&self, bridge: &EventBridge, data: &HashMap<String, String>) {
        if data.is_empty() {
            return;
        }

        let Some(kind) = data
            .get("type")
            .and_then(|code| PushKind::from_code_str(code))
        else {
            debug!(
                type_code = data.get("type").map(String::as_str),
                "dropping push message"
            );
            return;
        };

        let count: u32 = data
            .get("numElements")
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);

        bridge.notify(NotificationSpec {
            type_code: kind.type_code(),
            title: kind.summary(count),
            text: String::new(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bridge_with, FakeHost};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (EventBridge, Rc<RefCell<Vec<NotificationSpec>>>) {
        let host = FakeHost::default();
        let notifications = host.notifications.clone();
        let (bridge, _) = bridge_with(host);
        (bridge, notifications)
    }

    fn message(fields: &[(&str, &str)]) -> HashMap<String, String> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn new_message_push_renders_pluralized_notification() {
        let (bridge, notifications) = setup();

        PushRouter.on_message(&bridge, &message(&[("type", "2000"), ("numElements", "3")]));

        let rendered = notifications.borrow();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].type_code, 2000);
        assert_eq!(rendered[0].title, "3 new message(s)");
        assert_eq!(rendered[0].text, "");
    }

    #[test]
    fn contact_request_push_uses_its_own_type_code() {
        let (bridge, notifications) = setup();

        PushRouter.on_message(&bridge, &message(&[("type", "1000"), ("numElements", "1")]));

        let rendered = notifications.borrow();
        assert_eq!(rendered[0].type_code, 1000);
        assert_eq!(rendered[0].title, "1 new contact request(s)");
    }

    #[test]
    fn unrecognized_type_code_renders_nothing() {
        let (bridge, notifications) = setup();

        PushRouter.on_message(&bridge, &message(&[("type", "9999"), ("numElements", "3")]));

        assert!(notifications.borrow().is_empty());
    }

    #[test]
    fn empty_message_is_a_noop() {
        let (bridge, notifications) = setup();

        PushRouter.on_message(&bridge, &HashMap::new());

        assert!(notifications.borrow().is_empty());
    }

    #[test]
    fn missing_type_field_drops_the_message() {
        let (bridge, notifications) = setup();

        PushRouter.on_message(&bridge, &message(&[("numElements", "3")]));

        assert!(notifications.borrow().is_empty());
    }

    #[test]
    fn missing_count_defaults_to_zero() {
        let (bridge, notifications) = setup();

        PushRouter.on_message(&bridge, &message(&[("type", "2000")]));

        assert_eq!(notifications.borrow()[0].title, "0 new message(s)");
    }

    #[test]
    fn renotifying_keeps_one_id_per_kind() {
        let (bridge, notifications) = setup();

        PushRouter.on_message(&bridge, &message(&[("type", "2000"), ("numElements", "1")]));
        PushRouter.on_message(&bridge, &message(&[("type", "2000"), ("numElements", "2")]));

        // Both renders carry the same notification id; the OS replaces
        // the first with the second.
        let rendered = notifications.borrow();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].type_code, rendered[1].type_code);
        assert_eq!(rendered[1].title, "2 new message(s)");
    }
}
