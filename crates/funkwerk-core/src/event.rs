// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The outbound event protocol between the bridge and the native core.
//
// The native core consumes events as a numeric code plus a JSON payload
// string. On the Rust side the protocol is a closed tagged union: every
// variant owns its payload shape, and the numeric code and JSON encoding
// are derived from the variant rather than assembled ad hoc at call sites.
// A payload that cannot be expressed simply cannot be constructed.

use serde::Serialize;

use crate::error::Result;

/// Event code for the initialization result.
pub const EVENT_INIT_RESULT: i32 = 1000;
/// Event code for a push-token refresh.
pub const EVENT_PUSH_TOKEN_CHANGED: i32 = 2000;
/// Event code for the keyboard becoming visible.
pub const EVENT_KEYBOARD_SHOWN: i32 = 3000;
/// Event code for the keyboard becoming hidden.
pub const EVENT_KEYBOARD_HIDDEN: i32 = 3001;

/// An event delivered from the bridge to the native core.
///
/// Consumed exactly once; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Result of a permission negotiation round. Emitted exactly once per
    /// round, carrying the push token (if any) and the aggregate grant
    /// outcome.
    InitResult {
        token: Option<String>,
        permissions_granted: bool,
    },
    /// The push transport issued a new registration token.
    PushTokenChanged { token: String },
    /// The soft keyboard was classified as shown. `height` is the usable
    /// height remaining above the keyboard.
    KeyboardShown { height: i32, delta: i32 },
    /// The soft keyboard was classified as hidden. `height` is the full
    /// usable height.
    KeyboardHidden { height: i32, delta: i32 },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitResultPayload<'a> {
    token: Option<&'a str>,
    permissions_granted: bool,
}

#[derive(Serialize)]
struct TokenPayload<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct KeyboardPayload {
    height: i32,
    delta: i32,
}

impl BridgeEvent {
    /// Numeric event code as understood by the native core.
    pub fn code(&self) -> i32 {
        match self {
            Self::InitResult { .. } => EVENT_INIT_RESULT,
            Self::PushTokenChanged { .. } => EVENT_PUSH_TOKEN_CHANGED,
            Self::KeyboardShown { .. } => EVENT_KEYBOARD_SHOWN,
            Self::KeyboardHidden { .. } => EVENT_KEYBOARD_HIDDEN,
        }
    }

    /// JSON payload string for this event.
    pub fn payload(&self) -> Result<String> {
        let json = match self {
            Self::InitResult {
                token,
                permissions_granted,
            } => serde_json::to_string(&InitResultPayload {
                token: token.as_deref(),
                permissions_granted: *permissions_granted,
            })?,
            Self::PushTokenChanged { token } => serde_json::to_string(&TokenPayload { token })?,
            Self::KeyboardShown { height, delta } | Self::KeyboardHidden { height, delta } => {
                serde_json::to_string(&KeyboardPayload {
                    height: *height,
                    delta: *delta,
                })?
            }
        };
        Ok(json)
    }
}
