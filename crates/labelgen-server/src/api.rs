// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP surface of the bridge: route table, CORS policy, and the JSON
// envelopes the frontend consumes. No domain logic lives here — handlers
// delegate to the directory and dispatcher and shape their results.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use labelgen_core::BridgeConfig;
use labelgen_core::types::PrinterRecord;
use labelgen_print::directory::PrinterDirectory;

use crate::state::AppState;

/// Service identity reported by `GET /health`.
const SERVICE_NAME: &str = "labelgen-printer-bridge";

pub fn router(state: AppState, config: &BridgeConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .route("/printers", get(list_printers))
        .route("/print", post(print))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct PrintersResponse {
    success: bool,
    printers: Vec<PrinterRecord>,
}

#[derive(Debug, Deserialize)]
struct PrintRequest {
    printer_id: String,
    /// Informational only; logged, never interpreted.
    #[serde(default)]
    label_type: Option<String>,
    #[serde(default)]
    data: Option<PrintData>,
    /// Raw ZPL at the top level takes precedence over `data.zpl`.
    #[serde(default)]
    zpl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PrintData {
    #[serde(default)]
    zpl: Option<String>,
}

impl PrintRequest {
    fn payload(&self) -> Option<&str> {
        let top = self.zpl.as_deref().filter(|z| !z.is_empty());
        let nested = self
            .data
            .as_ref()
            .and_then(|d| d.zpl.as_deref())
            .filter(|z| !z.is_empty());
        top.or(nested)
    }
}

#[derive(Debug, Serialize)]
struct PrintResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(PrintResponse {
            success: false,
            message: None,
            job_id: None,
            error: Some(message.into()),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /printers` — fresh discovery snapshot on every call.
///
/// Always `success = true`: discovery failures are absorbed below this
/// layer and degrade to the debug record alone.
async fn list_printers(State(state): State<AppState>) -> Json<PrintersResponse> {
    info!("GET /printers");

    let snapshot = tokio::task::spawn_blocking(move || {
        PrinterDirectory::discover(state.backend.as_deref(), state.runner.as_ref())
    })
    .await;

    let printers = match snapshot {
        Ok(directory) => directory.into_records(),
        Err(e) => {
            error!(error = %e, "discovery task failed");
            vec![PrinterRecord::debug_sink()]
        }
    };

    Json(PrintersResponse {
        success: true,
        printers,
    })
}

/// `POST /print` — resolve the printer and relay the payload, one attempt.
async fn print(
    State(state): State<AppState>,
    request: Result<Json<PrintRequest>, JsonRejection>,
) -> Response {
    info!("POST /print");

    let Ok(Json(request)) = request else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid request format");
    };

    let Some(zpl) = request.payload().map(str::to_owned) else {
        return error_response(StatusCode::BAD_REQUEST, "No ZPL data provided");
    };

    info!(
        printer_id = %request.printer_id,
        label_type = request.label_type.as_deref().unwrap_or("unspecified"),
        bytes = zpl.len(),
        "print request"
    );

    let printer_id = request.printer_id.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        state.dispatcher.dispatch(
            state.backend.as_deref(),
            state.runner.as_ref(),
            &printer_id,
            zpl.as_bytes(),
        )
    })
    .await;

    match outcome {
        Ok(Ok(receipt)) => {
            let job_id = format!("job-{}", chrono::Utc::now().timestamp());
            Json(PrintResponse {
                success: true,
                message: Some(format!(
                    "Sent {} bytes to {}",
                    receipt.bytes_sent, receipt.printer_name
                )),
                job_id: Some(job_id),
                error: None,
            })
            .into_response()
        }
        Ok(Err(e)) => {
            warn!(printer_id = %request.printer_id, error = %e, "print request failed");
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, e.to_string())
        }
        Err(e) => {
            error!(error = %e, "print task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "print task failed")
        }
    }
}
