// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Funkwerk platform bridge.

use serde::{Deserialize, Serialize};

/// Classification of an inbound push message.
///
/// The push transport encodes the kind as a string-encoded integer in the
/// message's `type` field. Codes outside this set are dropped by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushKind {
    /// Someone sent a contact request.
    ContactRequest,
    /// One or more new messages arrived.
    NewMessage,
}

impl PushKind {
    /// Numeric type code, also used as the local notification id so that a
    /// newer notification of the same kind replaces the older one.
    pub fn type_code(&self) -> i32 {
        match self {
            Self::ContactRequest => 1000,
            Self::NewMessage => 2000,
        }
    }

    /// Parse the string-encoded type code carried in a push message.
    pub fn from_code_str(code: &str) -> Option<Self> {
        match code {
            "1000" => Some(Self::ContactRequest),
            "2000" => Some(Self::NewMessage),
            _ => None,
        }
    }

    /// Human-readable summary for `count` pending elements of this kind.
    pub fn summary(&self, count: u32) -> String {
        match self {
            Self::ContactRequest => format!("{count} new contact request(s)"),
            Self::NewMessage => format!("{count} new message(s)"),
        }
    }
}

/// A local notification ready to be handed to the OS notification subsystem.
///
/// `type_code` doubles as the OS notification id: re-notifying with the
/// same code replaces the prior notification. Derived per inbound message
/// or native-core request, rendered once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSpec {
    pub type_code: i32,
    pub title: String,
    pub text: String,
}

/// One row from the platform contacts provider.
///
/// The provider reports one row per phone number, so a contact with
/// several numbers appears as several rows sharing a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub name: String,
    pub number: String,
}

/// Outcome of a single permission within a negotiation round.
///
/// The identifier is retained even though the protocol currently reports
/// only the aggregate outcome to the native core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    pub permission: String,
    pub granted: bool,
}

impl PermissionGrant {
    pub fn granted(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            granted: true,
        }
    }

    pub fn denied(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            granted: false,
        }
    }
}
