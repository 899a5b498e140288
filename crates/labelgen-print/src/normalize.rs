// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pure, deterministic mapping from one raw enumeration row to one
// canonical printer record. These rules are what make records look the
// same regardless of which platform backend produced the row.

use labelgen_core::types::{Connection, PrinterKind, PrinterRecord, PrinterStatus};

use crate::backend::RawPrinterRow;

/// Vendor and protocol tokens associated with thermal label printers.
const THERMAL_KEYWORDS: [&str; 10] = [
    "zebra",
    "datamax",
    "sato",
    "tsc",
    "godex",
    "intermec",
    "honeywell",
    "citizen",
    "zpl",
    "epl",
];

/// Maximum length of a sanitized printer id.
const MAX_ID_LEN: usize = 64;

/// Maximum length of the URI-derived distinguishing suffix.
const MAX_URI_SUFFIX_LEN: usize = 20;

/// Classify a printer from its driver string (or name, for backends that
/// report no driver). Any thermal-vendor token match wins.
pub fn infer_kind(driver_or_name: &str) -> PrinterKind {
    let lowered = driver_or_name.to_lowercase();
    if THERMAL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        PrinterKind::Thermal
    } else {
        PrinterKind::Standard
    }
}

/// Infer the connection medium from the port or device URI.
///
/// Checks are ordered; first match wins. `WSD` must precede the generic
/// network markers, and the serial/parallel prefixes must not be reachable
/// through the substring checks above them.
pub fn infer_connection(identifier: &str) -> Connection {
    if identifier.starts_with("USB") || identifier.starts_with("usb://") {
        Connection::Usb
    } else if identifier.starts_with("WSD") {
        Connection::NetworkWsd
    } else if identifier.contains("IP_")
        || identifier.starts_with("ipp://")
        || identifier.starts_with("http://")
    {
        Connection::Network
    } else if identifier.starts_with("COM") || identifier.starts_with("LPT") {
        Connection::SerialParallel
    } else if identifier.starts_with("lpd://") {
        Connection::LpdNetwork
    } else {
        Connection::Unknown
    }
}

/// Fold a free-text OS status string into one of the four canonical
/// states. Total: every input maps somewhere, absent input included.
pub fn normalize_status(raw: Option<&str>) -> PrinterStatus {
    let Some(raw) = raw else {
        return PrinterStatus::Unknown;
    };
    let lowered = raw.to_lowercase();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if contains_any(&["normal", "idle", "ready"]) {
        PrinterStatus::Ready
    } else if contains_any(&["offline", "error", "disabled"]) {
        PrinterStatus::Offline
    } else if contains_any(&["printing", "processing"]) {
        PrinterStatus::Busy
    } else {
        PrinterStatus::Unknown
    }
}

/// Derive the stable printer id from the display name and the raw port or
/// URI identifier.
///
/// Two stages: a `serial=` marker in the identifier is extracted
/// semantically (delimited by `&` or `?`) so physically distinct USB
/// printers sharing a name get distinct ids; otherwise the identifier is
/// mangled into a best-effort distinguishing suffix capped at 20 chars.
/// The combined string is lowercased, spaces and dots fold to `_`, and
/// the result is capped at 64 chars.
pub fn sanitize_printer_id(name: &str, identifier: &str) -> String {
    let combined = if let Some((_, rest)) = identifier.split_once("serial=") {
        let serial = match rest.find(['&', '?']) {
            Some(end) => &rest[..end],
            None => rest,
        };
        format!("{name}_{serial}")
    } else if !identifier.is_empty() {
        let mut uri_part: String = identifier
            .replace("usb://", "")
            .chars()
            .map(|c| match c {
                '/' | '?' | '\\' | ':' => '_',
                c => c,
            })
            .collect();
        truncate_at_boundary(&mut uri_part, MAX_URI_SUFFIX_LEN);
        format!("{name}_{uri_part}")
    } else {
        name.to_owned()
    };

    let mut id: String = combined
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '.' => '_',
            c => c,
        })
        .collect();
    truncate_at_boundary(&mut id, MAX_ID_LEN);
    id
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
fn truncate_at_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

/// Compose the full normalization: one raw row in, one canonical record
/// out.
pub fn record_from_row(row: &RawPrinterRow) -> PrinterRecord {
    let kind_source = row.driver.as_deref().unwrap_or(&row.name);
    let connection = infer_connection(&row.identifier);

    PrinterRecord {
        id: sanitize_printer_id(&row.name, &row.identifier),
        name: row.name.clone(),
        kind: infer_kind(kind_source),
        connection,
        status: normalize_status(row.status.as_deref()),
        description: format!("{} ({connection})", row.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thermal_vendors_and_protocols_are_detected() {
        assert_eq!(infer_kind("ZDesigner ZD420 (ZPL)"), PrinterKind::Thermal);
        assert_eq!(infer_kind("SATO CL4NX"), PrinterKind::Thermal);
        assert_eq!(infer_kind("Datamax-O'Neil E-4205"), PrinterKind::Thermal);
        assert_eq!(infer_kind("generic epl driver"), PrinterKind::Thermal);
    }

    #[test]
    fn non_thermal_drivers_default_to_standard() {
        assert_eq!(infer_kind("HP Universal Printing PCL 6"), PrinterKind::Standard);
        assert_eq!(infer_kind(""), PrinterKind::Standard);
    }

    #[test]
    fn connection_inference_first_match_wins() {
        assert_eq!(infer_connection("USB001"), Connection::Usb);
        assert_eq!(infer_connection("usb://Zebra/ZD420"), Connection::Usb);
        assert_eq!(infer_connection("WSD-7a2b9c"), Connection::NetworkWsd);
        assert_eq!(infer_connection("IP_192.168.1.40"), Connection::Network);
        assert_eq!(infer_connection("ipp://host:631/printers/x"), Connection::Network);
        assert_eq!(infer_connection("http://host/ipp"), Connection::Network);
        assert_eq!(infer_connection("COM3:"), Connection::SerialParallel);
        assert_eq!(infer_connection("LPT1:"), Connection::SerialParallel);
        assert_eq!(infer_connection("lpd://192.168.1.9/queue"), Connection::LpdNetwork);
        assert_eq!(infer_connection("FILE:"), Connection::Unknown);
    }

    #[test]
    fn wsd_is_not_swallowed_by_the_network_arm() {
        // "WSD" ports would also be reachable via a substring check for
        // network markers if the order flipped.
        assert_eq!(infer_connection("WSD"), Connection::NetworkWsd);
    }

    #[test]
    fn status_normalization_is_total() {
        assert_eq!(normalize_status(Some("Normal")), PrinterStatus::Ready);
        assert_eq!(
            normalize_status(Some("idle.  enabled since Mon")),
            PrinterStatus::Ready
        );
        assert_eq!(normalize_status(Some("OFFLINE")), PrinterStatus::Offline);
        assert_eq!(
            normalize_status(Some("disabled since Mon")),
            PrinterStatus::Offline
        );
        assert_eq!(normalize_status(Some("error state")), PrinterStatus::Offline);
        assert_eq!(normalize_status(Some("now printing")), PrinterStatus::Busy);
        assert_eq!(normalize_status(Some("processing job 4")), PrinterStatus::Busy);
        assert_eq!(normalize_status(Some("paused")), PrinterStatus::Unknown);
        assert_eq!(normalize_status(Some("")), PrinterStatus::Unknown);
        assert_eq!(normalize_status(None), PrinterStatus::Unknown);
    }

    #[test]
    fn serial_marker_is_extracted_into_the_id() {
        let id = sanitize_printer_id("Zebra ZD420", "usb://Zebra/ZD420?serial=D2J185006011&x=1");
        assert_eq!(id, "zebra_zd420_d2j185006011");
    }

    #[test]
    fn same_name_distinct_serials_never_collide() {
        let a = sanitize_printer_id("Zebra ZD420", "usb://Zebra/ZD420?serial=AAA111");
        let b = sanitize_printer_id("Zebra ZD420", "usb://Zebra/ZD420?serial=BBB222");
        assert_ne!(a, b);
    }

    #[test]
    fn id_generation_is_deterministic() {
        let a = sanitize_printer_id("Office Laser", "WSD-9a2f");
        let b = sanitize_printer_id("Office Laser", "WSD-9a2f");
        assert_eq!(a, b);
        assert_eq!(a, "office_laser_wsd-9a2f");
    }

    #[test]
    fn uri_without_serial_becomes_a_bounded_suffix() {
        let id = sanitize_printer_id("Zebra", "usb://Zebra%20Technologies/ZTC%20ZD420-203dpi");
        // suffix capped at 20 chars before lowering/folding
        assert!(id.starts_with("zebra_"));
        assert!(id.len() <= 6 + 20);
        assert!(!id.contains('/'));
        assert!(!id.contains(':'));
    }

    #[test]
    fn empty_identifier_uses_the_name_alone() {
        assert_eq!(sanitize_printer_id("My Printer", ""), "my_printer");
    }

    #[test]
    fn long_ids_are_capped_at_64_chars() {
        let name = "A".repeat(80);
        let id = sanitize_printer_id(&name, "USB001");
        assert_eq!(id.len(), 64);
    }

    #[test]
    fn record_composition_fills_every_field() {
        let row = RawPrinterRow {
            name: "Zebra ZD420".into(),
            identifier: "USB001".into(),
            driver: Some("ZDesigner ZD420 (ZPL)".into()),
            status: Some("Normal".into()),
        };
        let record = record_from_row(&row);

        assert_eq!(record.id, "zebra_zd420_usb001");
        assert_eq!(record.name, "Zebra ZD420");
        assert_eq!(record.kind, PrinterKind::Thermal);
        assert_eq!(record.connection, Connection::Usb);
        assert_eq!(record.status, PrinterStatus::Ready);
        assert_eq!(record.description, "Zebra ZD420 (USB)");
    }

    #[test]
    fn driverless_rows_infer_kind_from_the_name() {
        let row = RawPrinterRow {
            name: "Zebra_ZD420".into(),
            identifier: "usb://Zebra/ZD420".into(),
            driver: None,
            status: None,
        };
        let record = record_from_row(&row);
        assert_eq!(record.kind, PrinterKind::Thermal);
        assert_eq!(record.status, PrinterStatus::Unknown);
    }
}
