// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared handler state.
//
// The discovery backend is selected once at startup. A host with no
// backend at all (unsupported OS) still serves requests — the directory
// degrades to the synthetic debug printer.

use std::sync::Arc;

use tracing::warn;

use labelgen_core::BridgeConfig;
use labelgen_print::backend::{DiscoveryBackend, platform_backend};
use labelgen_print::runner::{CommandRunner, SystemRunner};
use labelgen_print::dispatch::Dispatcher;

/// Cheaply cloneable state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub backend: Option<Arc<dyn DiscoveryBackend>>,
    pub runner: Arc<dyn CommandRunner>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(config: &BridgeConfig) -> Self {
        let backend = match platform_backend() {
            Ok(backend) => Some(Arc::from(backend)),
            Err(e) => {
                warn!(error = %e, "no discovery backend for this platform, serving debug sink only");
                None
            }
        };

        Self {
            backend,
            runner: Arc::new(SystemRunner),
            dispatcher: Arc::new(Dispatcher::new(config.debug_dir.clone())),
        }
    }
}
