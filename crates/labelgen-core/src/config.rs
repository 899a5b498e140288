// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Runtime settings for the bridge process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// TCP port the HTTP surface listens on (default 5001).
    pub port: u16,
    /// Origins allowed by the CORS policy — the frontend application.
    pub allowed_origins: Vec<String>,
    /// Directory the debug printer writes payload files into.
    pub debug_dir: PathBuf,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            allowed_origins: vec![
                "http://localhost:8001".into(),
                "http://127.0.0.1:8001".into(),
            ],
            debug_dir: std::env::temp_dir().join("labelgen"),
        }
    }
}

impl BridgeConfig {
    /// Defaults overridden by `LABELGEN_PORT`, `LABELGEN_ALLOWED_ORIGINS`
    /// (comma-separated), and `LABELGEN_DEBUG_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("LABELGEN_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        if let Ok(origins) = std::env::var("LABELGEN_ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_owned())
                .filter(|o| !o.is_empty())
                .collect();
            if !origins.is_empty() {
                config.allowed_origins = origins;
            }
        }

        if let Ok(dir) = std::env::var("LABELGEN_DEBUG_DIR") {
            if !dir.is_empty() {
                config.debug_dir = PathBuf::from(dir);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_frontend_contract() {
        let config = BridgeConfig::default();
        assert_eq!(config.port, 5001);
        assert!(config
            .allowed_origins
            .contains(&"http://localhost:8001".to_string()));
        assert!(config.debug_dir.ends_with("labelgen"));
    }
}
