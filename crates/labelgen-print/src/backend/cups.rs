// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CUPS enumeration for macOS and Linux.
//
// `lpstat -v` lists registered queues and their device URIs; a separate
// `lpstat -p` call supplies free-text status lines. The two result sets
// are correlated by queue name — a queue with no status line simply
// normalizes to `unknown`, and a failing status query never fails the
// whole discovery.

use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, warn};

use labelgen_core::error::{BridgeError, Result};

use crate::runner::CommandRunner;

use super::{DiscoveryBackend, RawPrinterRow};

#[derive(Debug)]
pub struct CupsBackend {
    /// `device for <name>: <uri>`
    device_re: Regex,
    /// `printer <name> [is] <status...>`
    status_re: Regex,
}

impl CupsBackend {
    pub fn new() -> Self {
        Self {
            device_re: Regex::new(r"device for ([^:]+):\s+(.+)").expect("device line regex"),
            status_re: Regex::new(r"printer\s+(\S+)\s+(?:is\s+)?(.+)").expect("status line regex"),
        }
    }
}

impl Default for CupsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoveryBackend for CupsBackend {
    fn name(&self) -> &'static str {
        "cups"
    }

    fn discover(&self, runner: &dyn CommandRunner) -> Result<Vec<RawPrinterRow>> {
        let output = runner
            .run("lpstat", &["-v"])
            .map_err(|e| BridgeError::DiscoveryUnavailable(format!("lpstat: {e}")))?;
        if !output.success {
            return Err(BridgeError::DiscoveryUnavailable(format!(
                "lpstat exited with failure: {}",
                output.stderr.trim()
            )));
        }

        let statuses = match runner.run("lpstat", &["-p"]) {
            Ok(status_output) if status_output.success => {
                self.parse_status_lines(&status_output.stdout)
            }
            Ok(status_output) => {
                warn!(
                    stderr = %status_output.stderr.trim(),
                    "lpstat status query failed, statuses default to unknown"
                );
                HashMap::new()
            }
            Err(e) => {
                warn!(error = %e, "lpstat status query could not run, statuses default to unknown");
                HashMap::new()
            }
        };

        let mut rows = Vec::new();
        for line in output.stdout.lines() {
            let Some(captures) = self.device_re.captures(line) else {
                continue;
            };
            let name = captures[1].trim().to_owned();
            let uri = captures[2].trim().to_owned();
            if name.is_empty() {
                continue;
            }

            let status = statuses.get(&name).cloned();
            rows.push(RawPrinterRow {
                name,
                identifier: uri,
                driver: None,
                status,
            });
        }

        debug!(count = rows.len(), "cups enumeration parsed");
        Ok(rows)
    }
}

impl CupsBackend {
    /// Map queue name → raw status text from `lpstat -p` output.
    fn parse_status_lines(&self, output: &str) -> HashMap<String, String> {
        let mut statuses = HashMap::new();
        for line in output.lines() {
            if let Some(captures) = self.status_re.captures(line) {
                statuses.insert(captures[1].to_owned(), captures[2].trim().to_owned());
            }
        }
        statuses
    }
}
