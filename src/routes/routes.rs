//! Defines routes for the conversion API.
//!
//! ## Structure
//! - **Health endpoints** (mounted at root)
//!   - `GET  /healthz` — liveness
//!   - `GET  /readyz`  — readiness (temp-dir disk check)
//!
//! - **Conversion endpoints** (mounted under `/api/v1`)
//!   - `GET  /api/v1/supported-formats` — accepted extensions + size limit
//!   - `POST /api/v1/convert/file`      — multipart upload conversion
//!   - `POST /api/v1/convert/url`       — download-and-convert

use crate::{
    config::AppConfig,
    handlers::{
        convert_handlers::{convert_file, convert_from_url, supported_formats},
        health_handlers::{healthz, readyz},
    },
    services::convert_service::ConvertService,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Multipart framing adds boundaries and headers on top of the payload,
/// so the raw body limit sits a little above `max_file_size`. Oversized
/// payloads are still rejected by the service's exact check.
const BODY_LIMIT_SLACK: u64 = 1024 * 1024;

/// Build and return the router for all conversion routes.
///
/// The router carries shared state (`ConvertService`) to all handlers.
pub fn routes(cfg: &AppConfig) -> Router<ConvertService> {
    let api = Router::new()
        .route("/supported-formats", get(supported_formats))
        .route("/convert/file", post(convert_file))
        .route("/convert/url", post(convert_from_url));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(body_limit(cfg.max_file_size)))
}

/// Raw body limit for a given `max_file_size`, saturating rather than
/// overflowing on extreme configs and on 32-bit targets.
fn body_limit(max_file_size: u64) -> usize {
    usize::try_from(max_file_size.saturating_add(BODY_LIMIT_SLACK)).unwrap_or(usize::MAX)
}
