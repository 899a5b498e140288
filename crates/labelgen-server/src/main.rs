// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// LabelGen Printer Bridge — local HTTP bridge between the frontend and the
// host's printing subsystems.
//
// Entry point. Initialises logging, selects the platform discovery
// backend, and serves the bridge API.

mod api;
mod state;

use std::net::SocketAddr;

use tracing::info;

use labelgen_core::BridgeConfig;

use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = BridgeConfig::from_env();
    let state = AppState::new(&config);
    let app = api::router(state, &config);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!(os = std::env::consts::OS, %addr, "LabelGen printer bridge starting");
    info!("available endpoints:");
    info!("  GET  /health   - health check");
    info!("  GET  /printers - list available printers");
    info!("  POST /print    - send print job");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind HTTP listener");
    axum::serve(listener, app)
        .await
        .expect("HTTP server failed");
}
