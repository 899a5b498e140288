// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Secondary Windows enumeration via `wmic`, for hosts where the
// PowerShell cmdlets are unavailable or return nothing.

use tracing::debug;

use labelgen_core::error::{BridgeError, Result};

use crate::runner::CommandRunner;

use super::{DiscoveryBackend, RawPrinterRow};

#[derive(Debug)]
pub struct WmicBackend;

impl DiscoveryBackend for WmicBackend {
    fn name(&self) -> &'static str {
        "wmic"
    }

    fn discover(&self, runner: &dyn CommandRunner) -> Result<Vec<RawPrinterRow>> {
        let output = runner
            .run(
                "wmic",
                &["printer", "get", "Name,PortName,DriverName", "/format:csv"],
            )
            .map_err(|e| BridgeError::DiscoveryUnavailable(format!("wmic: {e}")))?;
        if !output.success {
            return Err(BridgeError::DiscoveryUnavailable(format!(
                "wmic exited with failure: {}",
                output.stderr.trim()
            )));
        }

        let rows = parse_wmic_rows(&output.stdout);
        debug!(count = rows.len(), "wmic enumeration parsed");
        Ok(rows)
    }
}

/// Parse `wmic /format:csv` output.
///
/// The format never quotes fields, so a naive comma split is correct here.
/// wmic sorts the requested columns alphabetically and prepends the node:
/// Node, DriverName, Name, PortName. There is no status column; a queue
/// that enumerates is assumed ready.
fn parse_wmic_rows(csv: &str) -> Vec<RawPrinterRow> {
    let mut rows = Vec::new();
    for line in csv.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("Node,") {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 4 {
            continue;
        }

        let name = fields[2].trim();
        if name.is_empty() {
            continue;
        }

        rows.push(RawPrinterRow {
            name: name.to_owned(),
            identifier: fields[3].trim().to_owned(),
            driver: Some(fields[1].trim().to_owned()),
            status: Some("ready".to_owned()),
        });
    }
    rows
}
