// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Point-in-time printer directory.
//
// A directory is a value, not process state: every discovery call
// materializes a fresh snapshot and callers that need resolve-then-dispatch
// consistency hold the one snapshot they fetched.

use tracing::warn;

use labelgen_core::types::PrinterRecord;

use crate::backend::DiscoveryBackend;
use crate::normalize::record_from_row;
use crate::runner::CommandRunner;

/// Snapshot of the printers registered with the host, plus the synthetic
/// debug record. Never empty: discovery failure degrades to the debug
/// record alone.
#[derive(Debug, Clone)]
pub struct PrinterDirectory {
    records: Vec<PrinterRecord>,
}

impl PrinterDirectory {
    /// Run discovery and normalize the result.
    ///
    /// Backend errors are absorbed here with a logged warning — the API
    /// layer never sees a discovery failure. `None` is the backend-less
    /// state of an unsupported host.
    pub fn discover(backend: Option<&dyn DiscoveryBackend>, runner: &dyn CommandRunner) -> Self {
        let mut records: Vec<PrinterRecord> = match backend {
            Some(backend) => match backend.discover(runner) {
                Ok(rows) => rows.iter().map(record_from_row).collect(),
                Err(e) => {
                    warn!(
                        backend = backend.name(),
                        error = %e,
                        "printer discovery failed, serving debug sink only"
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        records.push(PrinterRecord::debug_sink());
        Self { records }
    }

    pub fn records(&self) -> &[PrinterRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PrinterRecord> {
        self.records
    }

    /// Linear scan by id.
    pub fn resolve(&self, printer_id: &str) -> Option<&PrinterRecord> {
        self.records.iter().find(|r| r.id == printer_id)
    }
}
