// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub host for desktop/CI builds where native mobile APIs are unavailable.
//
// Queries degrade to harmless defaults (no phone number, no contacts,
// zero status bar height) so the bridge keeps working; actions that only
// make sense on a device log a warning. The real implementation lives in
// the `android` module.

use funkwerk_core::error::{FunkwerkError, Result};
use funkwerk_core::types::{ContactRow, NotificationSpec};

use crate::traits::*;

/// No-op host returned on non-mobile platforms.
pub struct StubHost;

impl PlatformHost for StubHost {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativePermissions for StubHost {
    fn runtime_permissions_required(&self) -> bool {
        // No runtime grant model on desktop: initialization resolves
        // immediately, mirroring a legacy OS.
        false
    }

    fn request_permissions(&self, _permissions: &[String], _request_code: i32) -> Result<()> {
        tracing::warn!("NativePermissions::request_permissions called on stub host");
        Err(FunkwerkError::PlatformUnavailable)
    }
}

impl NativeTelephony for StubHost {
    fn phone_number(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

impl NativeContacts for StubHost {
    fn contact_rows(&self) -> Result<Vec<ContactRow>> {
        Ok(Vec::new())
    }
}

impl NativeNotify for StubHost {
    fn show_notification(&self, spec: &NotificationSpec) -> Result<()> {
        tracing::warn!(
            type_code = spec.type_code,
            title = %spec.title,
            "notification suppressed on stub host"
        );
        Ok(())
    }
}

impl NativeWindow for StubHost {
    fn status_bar_height(&self) -> Result<i32> {
        Err(FunkwerkError::PlatformUnavailable)
    }

    fn send_to_back(&self) -> Result<()> {
        tracing::warn!("NativeWindow::send_to_back called on stub host");
        Ok(())
    }
}

impl NativePush for StubHost {
    fn push_token(&self) -> Option<String> {
        None
    }
}
