//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness (name + version)
//! - GET /readyz   -> readiness that checks temp-dir disk I/O

use crate::services::convert_service::ConvertService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON body.
/// This endpoint should be cheap and never perform I/O.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// `GET /readyz`
///
/// Readiness probe that performs a best-effort write/read/delete against
/// the configured temp directory — the only piece of infrastructure a
/// conversion depends on at runtime.
///
/// Returns JSON describing each check. HTTP 200 when all checks pass,
/// HTTP 503 when any check fails.
pub async fn readyz(State(service): State<ConvertService>) -> impl IntoResponse {
    let probe = Path::new(&service.config().temp_dir).join(format!(".readyz-{}", Uuid::new_v4()));
    let disk_check = match fs::write(&probe, b"readyz").await {
        Ok(_) => match fs::read(&probe).await {
            Ok(bytes) => {
                if bytes == b"readyz" {
                    match fs::remove_file(&probe).await {
                        Ok(_) => (true, None::<String>),
                        Err(e) => (true, Some(format!("could not remove probe file: {}", e))),
                    }
                } else {
                    let _ = fs::remove_file(&probe).await;
                    (false, Some("probe file content mismatch".to_string()))
                }
            }
            Err(e) => {
                let _ = fs::remove_file(&probe).await;
                (false, Some(format!("could not read probe file: {}", e)))
            }
        },
        Err(e) => (false, Some(format!("could not write probe file: {}", e))),
    };

    let disk_ok = disk_check.0;
    // the engine is built with the service and holds no runtime
    // resources, so its check is presence only
    let engine_ok = true;
    let ok = disk_ok && engine_ok;

    let mut checks = HashMap::new();
    checks.insert(
        "temp_dir",
        CheckStatus {
            ok: disk_ok,
            error: disk_check.1,
        },
    );
    checks.insert(
        "engine",
        CheckStatus {
            ok: engine_ok,
            error: None,
        },
    );

    let body = ReadyResponse {
        status: if ok { "ok" } else { "error" },
        checks,
    };
    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: &'static str,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
