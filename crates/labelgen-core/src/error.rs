// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the LabelGen printer bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Discovery errors --
    /// Every enumeration command for the current platform failed or was
    /// missing. Recovered locally: the directory degrades to the debug
    /// record, never the caller.
    #[error("printer discovery unavailable: {0}")]
    DiscoveryUnavailable(String),

    /// The host OS has no discovery backend at all.
    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    // -- Dispatch errors --
    #[error("printer ID '{0}' not found")]
    PrinterNotFound(String),

    #[error("no ZPL data provided")]
    PayloadMissing,

    /// I/O or subprocess failure while sending a payload. Carries the
    /// platform command's diagnostic output for operability.
    #[error("print transport failed: {0}")]
    Transport(String),

    // -- Plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Whether the error is the caller's fault (400-class) rather than a
    /// transport or platform failure (500-class).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::PrinterNotFound(_) | Self::PayloadMissing
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
