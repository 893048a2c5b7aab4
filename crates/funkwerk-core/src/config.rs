// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use serde::{Deserialize, Serialize};

/// Configuration for one bridge instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Request code tagging the batched runtime-permission request. The
    /// host Activity must route `onRequestPermissionsResult` calls with
    /// this code back into the negotiator.
    pub permission_request_code: i32,
    /// Dangerous permissions required before the native core may start.
    /// Requested as one batch; a single denial fails the whole round.
    pub required_permissions: Vec<String>,
    /// Country calling code assumed for phone numbers written in national
    /// notation (leading zero).
    pub country_calling_code: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            permission_request_code: 1,
            required_permissions: vec![
                "android.permission.WRITE_EXTERNAL_STORAGE".into(),
                "android.permission.WAKE_LOCK".into(),
            ],
            country_calling_code: "49".into(),
        }
    }
}
