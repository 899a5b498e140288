// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Primary Windows enumeration via PowerShell `Get-Printer`.
//
// `ConvertTo-Csv` quotes every field, and printer names routinely contain
// commas ("Zebra, Inc ZD420"), so rows go through a quote-aware splitter
// rather than a naive comma split.

use tracing::debug;

use labelgen_core::error::{BridgeError, Result};

use crate::runner::CommandRunner;

use super::{DiscoveryBackend, RawPrinterRow};

/// Columns: Name, PortName, DriverName, PrinterStatus.
const ENUMERATE: &str = "Get-Printer | Select-Object Name,PortName,DriverName,PrinterStatus | ConvertTo-Csv -NoTypeInformation";

#[derive(Debug)]
pub struct PowerShellBackend;

impl DiscoveryBackend for PowerShellBackend {
    fn name(&self) -> &'static str {
        "powershell"
    }

    fn discover(&self, runner: &dyn CommandRunner) -> Result<Vec<RawPrinterRow>> {
        let output = runner
            .run("powershell", &["-Command", ENUMERATE])
            .map_err(|e| BridgeError::DiscoveryUnavailable(format!("powershell: {e}")))?;
        if !output.success {
            return Err(BridgeError::DiscoveryUnavailable(format!(
                "powershell exited with failure: {}",
                output.stderr.trim()
            )));
        }

        let rows = parse_csv_rows(&output.stdout);
        debug!(count = rows.len(), "powershell enumeration parsed");
        Ok(rows)
    }
}

/// Parse `ConvertTo-Csv` output into raw rows.
///
/// The first line is the header; blank lines and rows with fewer than four
/// fields are dropped.
fn parse_csv_rows(csv: &str) -> Vec<RawPrinterRow> {
    let mut rows = Vec::new();
    for (index, line) in csv.lines().enumerate() {
        if index == 0 || line.trim().is_empty() {
            continue;
        }

        let fields = split_quoted_csv(line);
        if fields.len() < 4 {
            continue;
        }

        let name = fields[0].trim();
        if name.is_empty() {
            continue;
        }

        rows.push(RawPrinterRow {
            name: name.to_owned(),
            identifier: fields[1].trim().to_owned(),
            driver: Some(fields[2].trim().to_owned()),
            status: Some(fields[3].trim().to_owned()),
        });
    }
    rows
}

/// Split one CSV line on commas, honoring double-quoted fields.
///
/// Quote characters delimit fields and are not part of the field value;
/// commas inside quotes do not split.
pub fn split_quoted_csv(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
