// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Narrow process-runner capability.
//
// Discovery backends and the dispatch router never spawn processes
// directly; they go through this trait so tests can substitute canned
// command output for the real platform tools.

use std::process::Command;

/// Captured result of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
}

/// Runs `(program, args)` and captures `(stdout, stderr, exit status)`.
///
/// An `Err` means the command could not be invoked at all (missing binary,
/// spawn failure); a command that ran but exited non-zero is an `Ok` with
/// `success == false`.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;
}

/// Production runner backed by `std::process::Command`.
///
/// Invocations are blocking with no timeout; async callers wrap them in
/// `spawn_blocking`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}
