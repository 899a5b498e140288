// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the LabelGen printer bridge.

use serde::{Deserialize, Serialize};

/// Identifier of the synthetic debug printer. Always present in the
/// directory, regardless of discovery outcome.
pub const DEBUG_PRINTER_ID: &str = "debug_file_printer";

/// Display name of the synthetic debug printer, also its dispatch key.
pub const DEBUG_PRINTER_NAME: &str = "DEBUG: Save ZPL to File";

/// Device class of a discovered printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterKind {
    /// Thermal label printer (Zebra, Datamax, SATO, ...).
    Thermal,
    /// Everything else — office/document printers.
    Standard,
    /// The synthetic file-sink printer.
    Debug,
}

/// Connection medium, inferred from the port or device URI the OS reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connection {
    #[serde(rename = "USB")]
    Usb,
    #[serde(rename = "Network")]
    Network,
    #[serde(rename = "Network (WSD)")]
    NetworkWsd,
    #[serde(rename = "Serial/Parallel")]
    SerialParallel,
    #[serde(rename = "LPD/Network")]
    LpdNetwork,
    /// Used only by the synthetic debug printer.
    #[serde(rename = "File System")]
    FileSystem,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Connection {
    /// Human-readable form, identical to the serialized wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usb => "USB",
            Self::Network => "Network",
            Self::NetworkWsd => "Network (WSD)",
            Self::SerialParallel => "Serial/Parallel",
            Self::LpdNetwork => "LPD/Network",
            Self::FileSystem => "File System",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized readiness state. Free-text OS status strings are folded into
/// exactly one of these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterStatus {
    Ready,
    Offline,
    Busy,
    Unknown,
}

/// Canonical printer record — the unit the rest of the bridge operates on.
///
/// Materialized fresh on every discovery call; never cached. `id` is a pure
/// function of `(name, raw identifier)` so it is stable across repeated
/// discovery calls for the same physical printer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterRecord {
    pub id: String,
    /// OS-reported display name; also the key handed back to the native
    /// print command on dispatch.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PrinterKind,
    pub connection: Connection,
    pub status: PrinterStatus,
    pub description: String,
}

impl PrinterRecord {
    /// The synthetic debug printer that saves payloads to the debug
    /// directory instead of real hardware.
    pub fn debug_sink() -> Self {
        Self {
            id: DEBUG_PRINTER_ID.into(),
            name: DEBUG_PRINTER_NAME.into(),
            kind: PrinterKind::Debug,
            connection: Connection::FileSystem,
            status: PrinterStatus::Ready,
            description: "Saves ZPL commands to the debug directory for testing".into(),
        }
    }
}
