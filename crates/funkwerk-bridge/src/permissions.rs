// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Runtime-permission negotiation gating native-core initialization.
//
// One round is one request/response cycle: `initialize` either resolves
// immediately (legacy permission model) or issues a single batched OS
// request, and the host's permission-result callback closes the round.
// The core receives exactly one initialization-result event per round.
//
// Owned exclusively by the main-thread callback sequence; no locking.

use tracing::{debug, info, warn};

use funkwerk_core::error::{FunkwerkError, Result};
use funkwerk_core::event::BridgeEvent;
use funkwerk_core::types::PermissionGrant;

use crate::event_bridge::EventBridge;

/// Lifecycle of a negotiation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// No round started yet.
    Idle,
    /// A batched request is out; waiting for the OS response carrying
    /// this request code.
    Pending { request_code: i32 },
    /// The last round resolved with this aggregate outcome.
    Resolved(bool),
}

/// Tracks whether dangerous permissions must be requested and maps the OS
/// response to a single boolean outcome.
///
/// The permission set and request code come from the bridge's
/// configuration.
pub struct PermissionNegotiator {
    state: NegotiationState,
}

impl PermissionNegotiator {
    pub fn new() -> Self {
        Self {
            state: NegotiationState::Idle,
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// Begin a negotiation round.
    ///
    /// On a platform without runtime grants the round resolves
    /// immediately as granted, with no OS dialog. Otherwise one batched
    /// request for the configured permission set is issued; if the
    /// dispatch itself fails the round resolves as denied rather than
    /// hanging forever.
    ///
    /// A second call while a round is pending is rejected with
    /// `NegotiationPending` — it emits nothing and leaves the tracked
    /// request code untouched. A resolved negotiator accepts a fresh
    /// round.
    pub fn initialize(&mut self, bridge: &EventBridge) -> Result<()> {
        if let NegotiationState::Pending { request_code } = self.state {
            warn!(request_code, "initialize called while a round is pending");
            return Err(FunkwerkError::NegotiationPending);
        }

        if !bridge.host().runtime_permissions_required() {
            debug!("runtime permissions not required, resolving immediately");
            self.resolve(bridge, true);
            return Ok(());
        }

        let request_code = bridge.config().permission_request_code;
        let permissions = &bridge.config().required_permissions;
        match bridge.host().request_permissions(permissions, request_code) {
            Ok(()) => {
                info!(
                    request_code,
                    count = permissions.len(),
                    "permission request dispatched"
                );
                self.state = NegotiationState::Pending { request_code };
            }
            Err(e) => {
                warn!(error = %e, "permission request dispatch failed, resolving as denied");
                self.resolve(bridge, false);
            }
        }
        Ok(())
    }

    /// Consume the OS response for a permission request.
    ///
    /// Responses are routed by request code: a code that does not match
    /// the pending round — or any response while no round is pending —
    /// is ignored. The aggregate outcome is granted iff every requested
    /// permission was granted; there is no partial-grant state.
    pub fn on_permissions_result(
        &mut self,
        request_code: i32,
        grants: &[PermissionGrant],
        bridge: &EventBridge,
    ) {
        let NegotiationState::Pending {
            request_code: pending,
        } = self.state
        else {
            debug!(request_code, "ignoring permission result: no round pending");
            return;
        };
        if request_code != pending {
            debug!(
                request_code,
                pending, "ignoring permission result for foreign request code"
            );
            return;
        }

        let granted = grants.iter().all(|g| g.granted);
        if !granted {
            let denied: Vec<&str> = grants
                .iter()
                .filter(|g| !g.granted)
                .map(|g| g.permission.as_str())
                .collect();
            info!(?denied, "permission round denied");
        }
        self.resolve(bridge, granted);
    }

    /// Close the round: record the outcome and emit the single
    /// initialization-result event, carrying the push token if the
    /// transport has issued one.
    fn resolve(&mut self, bridge: &EventBridge, granted: bool) {
        self.state = NegotiationState::Resolved(granted);
        bridge.emit(&BridgeEvent::InitResult {
            token: bridge.host().push_token(),
            permissions_granted: granted,
        });
    }
}

impl Default for PermissionNegotiator {
    fn default() -> Self {
        Self::new()
    }
}
