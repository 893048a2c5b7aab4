// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Soft-keyboard visibility heuristic derived from window-layout geometry.
//
// The host OS offers no reliable keyboard-visibility API across versions,
// so visibility is inferred from how much usable height a layout pass took
// away: a loss of more than a quarter of the full usable height means the
// keyboard opened; anything smaller is chrome fluctuation (status bar,
// orientation jitter) and classifies as hidden.

use tracing::debug;

use funkwerk_core::event::BridgeEvent;

use crate::event_bridge::EventBridge;

/// Window geometry reported by one layout-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutFrame {
    /// Bottom edge of the visible content frame, in pixels.
    pub visible_bottom: i32,
    /// Height of the root view (the full window), in pixels.
    pub root_height: i32,
}

/// Observes content-frame geometry and classifies transitions as
/// keyboard-shown/hidden.
///
/// Process-wide state, mutated only on layout-change notifications;
/// lifetime is the window's lifetime.
pub struct KeyboardMonitor {
    previous_usable_height: i32,
    status_bar_height: i32,
}

impl KeyboardMonitor {
    /// The status bar height is sampled once here; if the platform lookup
    /// fails the monitor runs with zero, which degrades classification
    /// accuracy but never fails.
    pub fn new(bridge: &EventBridge) -> Self {
        let status_bar_height = bridge.status_bar_height();
        debug!(status_bar_height, "keyboard monitor started");
        Self {
            previous_usable_height: 0,
            status_bar_height,
        }
    }

    /// Consume one layout-change notification, emitting at most one
    /// keyboard event.
    ///
    /// Consecutive notifications with an unchanged usable height are
    /// suppressed entirely.
    pub fn on_layout_change(&mut self, frame: LayoutFrame, bridge: &EventBridge) {
        let usable_height = frame.visible_bottom - self.status_bar_height;
        if usable_height == self.previous_usable_height {
            return;
        }

        let usable_height_full = frame.root_height - self.status_bar_height;
        let delta = usable_height_full - usable_height;

        if delta > usable_height_full / 4 {
            bridge.emit(&BridgeEvent::KeyboardShown {
                height: usable_height,
                delta,
            });
        } else {
            bridge.emit(&BridgeEvent::KeyboardHidden {
                height: usable_height_full,
                delta,
            });
        }

        self.previous_usable_height = usable_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bridge_with, FakeHost};

    fn frame(visible_bottom: i32) -> LayoutFrame {
        LayoutFrame {
            visible_bottom,
            root_height: 1000,
        }
    }

    fn setup() -> (EventBridge, std::rc::Rc<std::cell::RefCell<Vec<(i32, String)>>>) {
        bridge_with(FakeHost::default())
    }

    #[test]
    fn large_height_loss_classifies_as_shown() {
        let (bridge, events) = setup();
        let mut monitor = KeyboardMonitor::new(&bridge);

        // Full height 1000, status bar 0: dropping to 700 loses 300,
        // which exceeds the quarter-height threshold of 250.
        monitor.on_layout_change(frame(700), &bridge);

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 3000);
        let payload: serde_json::Value = serde_json::from_str(&events[0].1).expect("json");
        assert_eq!(payload, serde_json::json!({"height": 700, "delta": 300}));
    }

    #[test]
    fn small_height_loss_classifies_as_hidden() {
        let (bridge, events) = setup();
        let mut monitor = KeyboardMonitor::new(&bridge);

        // Dropping to 800 loses 200, at or below the threshold of 250.
        monitor.on_layout_change(frame(800), &bridge);

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 3001);
        let payload: serde_json::Value = serde_json::from_str(&events[0].1).expect("json");
        assert_eq!(payload, serde_json::json!({"height": 1000, "delta": 200}));
    }

    #[test]
    fn loss_exactly_at_threshold_classifies_as_hidden() {
        let (bridge, events) = setup();
        let mut monitor = KeyboardMonitor::new(&bridge);

        monitor.on_layout_change(frame(750), &bridge);

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 3001);
    }

    #[test]
    fn unchanged_usable_height_is_suppressed() {
        let (bridge, events) = setup();
        let mut monitor = KeyboardMonitor::new(&bridge);

        monitor.on_layout_change(frame(700), &bridge);
        monitor.on_layout_change(frame(700), &bridge);
        monitor.on_layout_change(frame(700), &bridge);

        assert_eq!(events.borrow().len(), 1, "duplicates emit nothing");
    }

    #[test]
    fn each_transition_emits_exactly_one_event() {
        let (bridge, events) = setup();
        let mut monitor = KeyboardMonitor::new(&bridge);

        monitor.on_layout_change(frame(700), &bridge); // shown
        monitor.on_layout_change(frame(1000), &bridge); // hidden
        monitor.on_layout_change(frame(700), &bridge); // shown again

        let codes: Vec<i32> = events.borrow().iter().map(|(code, _)| *code).collect();
        assert_eq!(codes, vec![3000, 3001, 3000]);
    }

    #[test]
    fn status_bar_height_offsets_the_geometry() {
        let (bridge, events) = bridge_with(FakeHost {
            status_bar_height: Some(100),
            ..FakeHost::default()
        });
        let mut monitor = KeyboardMonitor::new(&bridge);

        // usable = 700 - 100 = 600, full = 1000 - 100 = 900, delta = 300,
        // threshold = 225: shown.
        monitor.on_layout_change(
            LayoutFrame {
                visible_bottom: 700,
                root_height: 1000,
            },
            &bridge,
        );

        let events = events.borrow();
        assert_eq!(events[0].0, 3000);
        let payload: serde_json::Value = serde_json::from_str(&events[0].1).expect("json");
        assert_eq!(payload, serde_json::json!({"height": 600, "delta": 300}));
    }
}
