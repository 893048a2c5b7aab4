// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles shared by the unit tests: a core sink that records every
// delivered event and a scriptable platform host.

use std::cell::RefCell;
use std::rc::Rc;

use funkwerk_core::config::BridgeConfig;
use funkwerk_core::error::{FunkwerkError, Result};
use funkwerk_core::types::{ContactRow, NotificationSpec};

use crate::event_bridge::{CoreSink, EventBridge};
use crate::traits::*;

/// Bridge over the given host with a recording sink and default config.
/// Returns the bridge and the shared event log.
pub(crate) fn bridge_with(host: FakeHost) -> (EventBridge, Rc<RefCell<Vec<(i32, String)>>>) {
    let (sink, events) = RecordingSink::new();
    (
        EventBridge::new(Box::new(sink), Box::new(host), BridgeConfig::default()),
        events,
    )
}

/// Records every `(code, payload)` pair delivered to the native core.
pub(crate) struct RecordingSink {
    events: Rc<RefCell<Vec<(i32, String)>>>,
}

impl RecordingSink {
    /// Returns the sink and a shared handle to its event log, so the log
    /// stays inspectable after the sink moves into the bridge.
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<(i32, String)>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }
}

impl CoreSink for RecordingSink {
    fn on_native_event(&self, code: i32, payload: &str) {
        self.events.borrow_mut().push((code, payload.to_string()));
    }
}

/// Scriptable host: field values configure query results, shared handles
/// record the actions taken.
pub(crate) struct FakeHost {
    pub runtime_required: bool,
    pub fail_requests: bool,
    pub token: Option<String>,
    pub phone: Option<String>,
    pub rows: Vec<ContactRow>,
    /// None means the platform lookup fails.
    pub status_bar_height: Option<i32>,
    pub requests: Rc<RefCell<Vec<(Vec<String>, i32)>>>,
    pub notifications: Rc<RefCell<Vec<NotificationSpec>>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            runtime_required: false,
            fail_requests: false,
            token: None,
            phone: None,
            rows: Vec::new(),
            status_bar_height: None,
            requests: Rc::new(RefCell::new(Vec::new())),
            notifications: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl PlatformHost for FakeHost {
    fn platform_name(&self) -> &str {
        "Fake (test)"
    }
}

impl NativePermissions for FakeHost {
    fn runtime_permissions_required(&self) -> bool {
        self.runtime_required
    }

    fn request_permissions(&self, permissions: &[String], request_code: i32) -> Result<()> {
        if self.fail_requests {
            return Err(FunkwerkError::Host("request dispatch failed".into()));
        }
        self.requests
            .borrow_mut()
            .push((permissions.to_vec(), request_code));
        Ok(())
    }
}

impl NativeTelephony for FakeHost {
    fn phone_number(&self) -> Result<Option<String>> {
        Ok(self.phone.clone())
    }
}

impl NativeContacts for FakeHost {
    fn contact_rows(&self) -> Result<Vec<ContactRow>> {
        Ok(self.rows.clone())
    }
}

impl NativeNotify for FakeHost {
    fn show_notification(&self, spec: &NotificationSpec) -> Result<()> {
        self.notifications.borrow_mut().push(spec.clone());
        Ok(())
    }
}

impl NativeWindow for FakeHost {
    fn status_bar_height(&self) -> Result<i32> {
        self.status_bar_height
            .ok_or(FunkwerkError::PlatformUnavailable)
    }

    fn send_to_back(&self) -> Result<()> {
        Ok(())
    }
}

impl NativePush for FakeHost {
    fn push_token(&self) -> Option<String> {
        self.token.clone()
    }
}
