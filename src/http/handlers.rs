//! HTTP request handlers
//!
//! Implements handlers for the conversion and service endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Result, ServerError};
use crate::state::AppState;
use crate::subtitle::{Conversion, SrtSettings};

/// Conversion request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertRequest {
    /// Scripts in output order; `null` entries count as empty scripts
    #[serde(default)]
    pub scripts: Vec<Option<String>>,

    /// Overrides the configured converter settings
    #[serde(default)]
    pub settings: Option<SrtSettings>,
}

/// Conversion response body
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub srt: String,
    pub entries: usize,
    pub next_index: usize,
    pub elapsed_secs: u64,
    pub scripts_converted: usize,
    pub cached: bool,
    pub generated_at: String,
}

impl ConvertResponse {
    fn new(conversion: &Conversion, cached: bool) -> Self {
        Self {
            srt: conversion.srt.clone(),
            entries: conversion.entry_count(),
            next_index: conversion.clock.next_index,
            elapsed_secs: conversion.clock.elapsed_secs,
            scripts_converted: conversion.scripts_converted,
            cached,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Check limits and settings, and flatten null scripts to empty ones
fn prepare(state: &AppState, request: ConvertRequest) -> Result<(Vec<String>, SrtSettings)> {
    let max = state.config.limits.max_scripts;
    if request.scripts.len() > max {
        return Err(ServerError::TooManyScripts {
            count: request.scripts.len(),
            max,
        });
    }

    let settings = request.settings.unwrap_or(state.config.subtitle);
    settings.validate()?;

    let scripts = request
        .scripts
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();
    Ok((scripts, settings))
}

/// Run a conversion for an endpoint, keeping the metrics in step
fn run_conversion(
    state: &AppState,
    endpoint: &str,
    request: ConvertRequest,
) -> Result<(Arc<Conversion>, bool)> {
    state.metrics.record_request(endpoint);

    let (scripts, settings) = prepare(state, request).inspect_err(|e| {
        tracing::warn!("Rejected conversion request on {}: {}", endpoint, e);
        state.metrics.record_error(e.kind());
    })?;

    let (conversion, cached) = state.convert(&scripts, settings);
    tracing::info!(
        "Converted {} script(s) into {} entries{}",
        conversion.scripts_converted,
        conversion.entry_count(),
        if cached { " (cached)" } else { "" }
    );
    state.metrics.record_bytes(conversion.srt.len() as u64);
    Ok((conversion, cached))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("srt-narrator v", env!("CARGO_PKG_VERSION"))
}

/// Conversion endpoint
/// POST /api/srt
pub async fn convert_srt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>> {
    let (conversion, cached) = run_conversion(&state, "/api/srt", request)?;
    Ok(Json(ConvertResponse::new(&conversion, cached)))
}

/// Download endpoint, same input as `/api/srt`
/// POST /api/srt/download
pub async fn download_srt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConvertRequest>,
) -> Result<Response> {
    let (conversion, _) = run_conversion(&state, "/api/srt/download", request)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.download_filename.replace('"', "")
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| ServerError::Internal(format!("Invalid download filename: {}", e)))?,
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Ok((headers, Bytes::from(conversion.srt.clone())).into_response())
}

/// Debug endpoint - cache statistics
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.conversion_cache.stats();

    Json(serde_json::json!({
        "entry_count": stats.entry_count,
        "capacity": stats.capacity,
        "hits": stats.hits,
        "misses": stats.misses,
        "oldest_entry_age_secs": stats.oldest_entry_age_secs,
        "utilization": format!("{:.1}%",
            (stats.entry_count as f64 / stats.capacity as f64) * 100.0
        )
    }))
}
