// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Funkwerk.

use thiserror::Error;

/// Top-level error type for all Funkwerk operations.
#[derive(Debug, Error)]
pub enum FunkwerkError {
    // -- Event protocol --
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    // -- Permission negotiation --
    #[error("a permission negotiation round is already pending")]
    NegotiationPending,

    // -- Platform host --
    #[error("platform host error: {0}")]
    Host(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FunkwerkError>;
