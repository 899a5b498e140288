// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// LabelGen Print — platform printer discovery, record normalization, and
// raw print dispatch. This crate bridges between the core domain types in
// `labelgen-core` and the host operating system's printing subsystems.

pub mod backend;
pub mod directory;
pub mod dispatch;
pub mod normalize;
pub mod runner;

pub use backend::{DiscoveryBackend, RawPrinterRow, platform_backend};
pub use directory::PrinterDirectory;
pub use dispatch::{DispatchReceipt, Dispatcher};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
