// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform discovery backends.
//
// Each backend runs one or more external enumeration commands and yields
// raw printer rows for the normalizer. The backend for the current host is
// selected once at process start, not re-detected per call.

pub mod cups;
pub mod powershell;
pub mod wmic;

use tracing::warn;

use labelgen_core::error::{BridgeError, Result};

use crate::runner::CommandRunner;

pub use cups::CupsBackend;
pub use powershell::PowerShellBackend;
pub use wmic::WmicBackend;

/// One loosely structured row of OS printer-enumeration output, before
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrinterRow {
    /// OS-reported display name.
    pub name: String,
    /// Port name or device URI, whichever the platform reports.
    pub identifier: String,
    /// Driver string, where the enumeration format carries one.
    pub driver: Option<String>,
    /// Free-text status, where the enumeration format carries one.
    pub status: Option<String>,
}

/// Produces zero or more raw printer rows for the current host.
///
/// Implementations tolerate partial or malformed command output: header
/// rows and blank lines are skipped, short rows are dropped. Inability to
/// invoke the enumeration mechanism is a `DiscoveryUnavailable` error,
/// which the directory layer absorbs into an empty result.
pub trait DiscoveryBackend: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn discover(&self, runner: &dyn CommandRunner) -> Result<Vec<RawPrinterRow>>;
}

/// Primary/secondary fallback chain for Windows-class hosts.
///
/// The secondary backend runs when the primary errors or yields zero rows;
/// callers only see the result of whichever succeeded.
#[derive(Debug)]
pub struct FallbackBackend {
    primary: Box<dyn DiscoveryBackend>,
    secondary: Box<dyn DiscoveryBackend>,
}

impl FallbackBackend {
    pub fn new(primary: Box<dyn DiscoveryBackend>, secondary: Box<dyn DiscoveryBackend>) -> Self {
        Self { primary, secondary }
    }
}

impl DiscoveryBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        "fallback-chain"
    }

    fn discover(&self, runner: &dyn CommandRunner) -> Result<Vec<RawPrinterRow>> {
        match self.primary.discover(runner) {
            Ok(rows) if !rows.is_empty() => return Ok(rows),
            Ok(_) => warn!(
                backend = self.primary.name(),
                "primary enumeration returned no printers, trying fallback"
            ),
            Err(e) => warn!(
                backend = self.primary.name(),
                error = %e,
                "primary enumeration failed, trying fallback"
            ),
        }
        self.secondary.discover(runner)
    }
}

/// Select the discovery backend for the current host OS.
///
/// The only hard discovery error: an OS with no backend at all yields
/// `UnsupportedPlatform`. The caller decides whether that is fatal; the
/// bridge server absorbs it into a backend-less state that still serves
/// the debug sink.
pub fn platform_backend() -> Result<Box<dyn DiscoveryBackend>> {
    backend_for_os(std::env::consts::OS)
}

/// OS-keyed backend selection, split out so tests can exercise every arm.
pub fn backend_for_os(os: &str) -> Result<Box<dyn DiscoveryBackend>> {
    match os {
        "windows" => Ok(Box::new(FallbackBackend::new(
            Box::new(PowerShellBackend),
            Box::new(WmicBackend),
        ))),
        "macos" | "linux" => Ok(Box::new(CupsBackend::new())),
        other => Err(BridgeError::UnsupportedPlatform(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::PanicRunner;

    #[derive(Debug)]
    struct FixedBackend(Vec<RawPrinterRow>);

    impl DiscoveryBackend for FixedBackend {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn discover(&self, _runner: &dyn CommandRunner) -> Result<Vec<RawPrinterRow>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct FailingBackend;

    impl DiscoveryBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn discover(&self, _runner: &dyn CommandRunner) -> Result<Vec<RawPrinterRow>> {
            Err(BridgeError::DiscoveryUnavailable("command missing".into()))
        }
    }

    fn row(name: &str) -> RawPrinterRow {
        RawPrinterRow {
            name: name.into(),
            identifier: "USB001".into(),
            driver: Some("ZDesigner".into()),
            status: Some("Normal".into()),
        }
    }

    #[test]
    fn fallback_uses_primary_when_it_yields_rows() {
        let chain = FallbackBackend::new(
            Box::new(FixedBackend(vec![row("Primary")])),
            Box::new(FixedBackend(vec![row("Secondary")])),
        );
        let rows = chain.discover(&PanicRunner).expect("discover");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Primary");
    }

    #[test]
    fn fallback_runs_secondary_when_primary_fails() {
        let chain = FallbackBackend::new(
            Box::new(FailingBackend),
            Box::new(FixedBackend(vec![row("Secondary")])),
        );
        let rows = chain.discover(&PanicRunner).expect("discover");
        assert_eq!(rows[0].name, "Secondary");
    }

    #[test]
    fn fallback_runs_secondary_when_primary_is_empty() {
        let chain = FallbackBackend::new(
            Box::new(FixedBackend(Vec::new())),
            Box::new(FixedBackend(vec![row("Secondary")])),
        );
        let rows = chain.discover(&PanicRunner).expect("discover");
        assert_eq!(rows[0].name, "Secondary");
    }

    #[test]
    fn fallback_propagates_when_both_fail() {
        let chain = FallbackBackend::new(Box::new(FailingBackend), Box::new(FailingBackend));
        let err = chain.discover(&PanicRunner).unwrap_err();
        assert!(matches!(err, BridgeError::DiscoveryUnavailable(_)));
    }

    #[test]
    fn backend_selection_covers_known_platforms() {
        assert!(backend_for_os("windows").is_ok());
        assert!(backend_for_os("macos").is_ok());
        assert!(backend_for_os("linux").is_ok());
    }

    #[test]
    fn backend_selection_rejects_unknown_platform() {
        let err = backend_for_os("plan9").unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedPlatform(os) if os == "plan9"));
    }
}
