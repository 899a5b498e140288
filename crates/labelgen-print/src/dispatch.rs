// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print dispatch router.
//
// Resolves a printer id against a fresh directory snapshot, then moves the
// payload over the platform transport: a direct device-handle write on
// Windows, a raw-mode queue submission on CUPS hosts, or the filesystem
// debug sink. One attempt per request — success, or a typed failure back
// to the caller.

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use labelgen_core::error::{BridgeError, Result};
use labelgen_core::types::{DEBUG_PRINTER_ID, DEBUG_PRINTER_NAME};

use crate::backend::DiscoveryBackend;
use crate::directory::PrinterDirectory;
use crate::runner::CommandRunner;

/// Outcome of a successful dispatch, for the response message.
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    pub printer_name: String,
    pub bytes_sent: usize,
}

/// Routes payloads to the platform transport.
pub struct Dispatcher {
    debug_dir: PathBuf,
}

impl Dispatcher {
    pub fn new(debug_dir: PathBuf) -> Self {
        Self { debug_dir }
    }

    /// Resolve `printer_id` and transfer `payload` to it.
    ///
    /// The debug id resolves without a discovery call; any other id takes
    /// a fresh snapshot. Unknown ids fail with `PrinterNotFound` before
    /// any transport is touched.
    pub fn dispatch(
        &self,
        backend: Option<&dyn DiscoveryBackend>,
        runner: &dyn CommandRunner,
        printer_id: &str,
        payload: &[u8],
    ) -> Result<DispatchReceipt> {
        let printer_name = resolve_name(backend, runner, printer_id)?;
        let bytes_sent = self.send(&printer_name, runner, payload)?;
        Ok(DispatchReceipt {
            printer_name,
            bytes_sent,
        })
    }

    fn send(&self, printer_name: &str, runner: &dyn CommandRunner, payload: &[u8]) -> Result<usize> {
        if printer_name == DEBUG_PRINTER_NAME {
            return self.save_debug_file(payload);
        }

        match std::env::consts::OS {
            "windows" => send_to_device(printer_name, payload),
            "macos" | "linux" => send_to_queue(printer_name, runner, payload),
            other => Err(BridgeError::UnsupportedPlatform(other.to_owned())),
        }
    }

    /// Debug sink: write the payload to a timestamped file under the debug
    /// directory. Never fails for lack of real hardware.
    fn save_debug_file(&self, payload: &[u8]) -> Result<usize> {
        std::fs::create_dir_all(&self.debug_dir)
            .map_err(|e| BridgeError::Transport(format!("failed to create debug directory: {e}")))?;

        let filename = format!(
            "label-{}.zpl",
            chrono::Local::now().format("%Y%m%d-%H%M%S%.3f")
        );
        let path = self.debug_dir.join(filename);
        std::fs::write(&path, payload)
            .map_err(|e| BridgeError::Transport(format!("failed to write debug file: {e}")))?;

        info!(path = %path.display(), bytes = payload.len(), "saved ZPL payload to debug file");
        Ok(payload.len())
    }
}

/// Resolve a printer id to the OS display name used by the transport.
fn resolve_name(
    backend: Option<&dyn DiscoveryBackend>,
    runner: &dyn CommandRunner,
    printer_id: &str,
) -> Result<String> {
    if printer_id == DEBUG_PRINTER_ID {
        return Ok(DEBUG_PRINTER_NAME.to_owned());
    }

    let directory = PrinterDirectory::discover(backend, runner);
    directory
        .resolve(printer_id)
        .map(|record| record.name.clone())
        .ok_or_else(|| BridgeError::PrinterNotFound(printer_id.to_owned()))
}

/// Windows transport: open the printer's device path and write the bytes
/// verbatim.
fn send_to_device(printer_name: &str, payload: &[u8]) -> Result<usize> {
    let device_path = format!(r"\\.\{printer_name}");
    let mut device = std::fs::OpenOptions::new()
        .write(true)
        .open(&device_path)
        .map_err(|e| BridgeError::Transport(format!("failed to open printer {printer_name}: {e}")))?;

    device
        .write_all(payload)
        .map_err(|e| BridgeError::Transport(format!("failed to write to {printer_name}: {e}")))?;

    info!(printer = printer_name, bytes = payload.len(), "wrote payload to printer device");
    Ok(payload.len())
}

/// CUPS transport: spool the payload to a private temporary file, then
/// submit it raw to the named queue. The spool file is removed on every
/// exit path when the handle drops.
fn send_to_queue(printer_name: &str, runner: &dyn CommandRunner, payload: &[u8]) -> Result<usize> {
    let mut spool = tempfile::Builder::new()
        .prefix("label-")
        .suffix(".zpl")
        .tempfile()
        .map_err(|e| BridgeError::Transport(format!("failed to create spool file: {e}")))?;

    spool
        .write_all(payload)
        .and_then(|()| spool.flush())
        .map_err(|e| BridgeError::Transport(format!("failed to write spool file: {e}")))?;

    let spool_path = spool.path().display().to_string();
    let output = runner
        .run("lpr", &["-P", printer_name, "-o", "raw", &spool_path])
        .map_err(|e| BridgeError::Transport(format!("lpr: {e}")))?;

    if !output.success {
        return Err(BridgeError::Transport(format!(
            "lpr failed for {printer_name}: {}",
            output.stderr.trim()
        )));
    }

    info!(printer = printer_name, bytes = payload.len(), "submitted raw job to print queue");
    Ok(payload.len())
}
