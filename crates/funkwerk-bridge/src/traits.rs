// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native host capabilities.
//
// Everything the bridge needs from the host OS — permission dialogs,
// telephony and contacts providers, the notification subsystem, window
// control, push-token issuance — is expressed as a capability trait here.
// The bridge core never touches a platform API directly.

use funkwerk_core::error::Result;
use funkwerk_core::types::{ContactRow, NotificationSpec};

/// Unified host that groups all native capabilities.
///
/// Platforms that lack a capability (e.g. no telephony on desktop) return
/// `FunkwerkError::PlatformUnavailable` or the documented degraded default
/// from the stub implementation.
pub trait PlatformHost:
    NativePermissions + NativeTelephony + NativeContacts + NativeNotify + NativeWindow + NativePush
{
    /// Human-readable platform name (e.g. "Android 14").
    fn platform_name(&self) -> &str;
}

/// Runtime-permission model of the host OS.
pub trait NativePermissions {
    /// Whether the platform requires dangerous permissions to be granted
    /// at runtime. Legacy OS versions grant everything at install time.
    fn runtime_permissions_required(&self) -> bool;

    /// Issue one batched permission request tagged with `request_code`.
    /// Returns Ok(()) once the dialog has been dispatched; the outcome
    /// arrives later through the host's permission-result callback.
    fn request_permissions(&self, permissions: &[String], request_code: i32) -> Result<()>;
}

/// Telephony provider queries.
pub trait NativeTelephony {
    /// The device's own line number, if the SIM exposes one.
    fn phone_number(&self) -> Result<Option<String>>;
}

/// Contacts provider queries.
pub trait NativeContacts {
    /// All phone-number rows from the contacts provider, in provider
    /// order. A contact with several numbers yields several rows sharing
    /// a display name.
    fn contact_rows(&self) -> Result<Vec<ContactRow>>;
}

/// OS notification subsystem.
pub trait NativeNotify {
    /// Render a local notification. The spec's `type_code` is used as the
    /// OS notification id, so re-notifying with the same code replaces
    /// the prior notification of that kind.
    fn show_notification(&self, spec: &NotificationSpec) -> Result<()>;
}

/// Window and task control.
pub trait NativeWindow {
    /// Height of the OS status bar in pixels. Returns Ok(0) when the
    /// platform resource cannot be resolved.
    fn status_bar_height(&self) -> Result<i32>;

    /// Send the host app's task to the background.
    fn send_to_back(&self) -> Result<()>;
}

/// Push-messaging token issuance.
pub trait NativePush {
    /// Current push registration token, or None if the transport has not
    /// issued one (yet).
    fn push_token(&self) -> Option<String>;
}
