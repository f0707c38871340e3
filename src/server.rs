//! HTTP surface: the request handler in front of the pipeline.
//!
//! Two routes:
//!
//! * `GET /` — liveness message.
//! * `POST /analyze` — multipart upload (`file` required, `query` optional)
//!   returning `{"status", "file_processed", "analysis"}`.
//!
//! ## Error mapping
//!
//! Upload validation problems (wrong extension, empty file) are rejected
//! with 400 before any file is written or any pipeline work begins. Every
//! other failure — extraction, provider, I/O — is caught at this boundary
//! and returned as 500 with the underlying message in `detail`.
//!
//! ## Transient-file ownership
//!
//! Each request owns exactly one [`TransientUpload`], written under the
//! configured storage directory with a fresh UUID so concurrent requests
//! never collide. The file is removed when the guard drops, on every exit
//! path including panics; removal failures are swallowed and logged at
//! `debug`, never surfaced to the caller.

use crate::analyze::analyze;
use crate::config::AnalyzerConfig;
use crate::prompts::DEFAULT_QUERY;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Uploads above this size are rejected by the extractor anyway; the cap
/// keeps a hostile client from buffering gigabytes in memory.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build the service router.
pub fn router(config: Arc<AnalyzerConfig>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/analyze", post(analyze_document))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(config)
}

/// Health check.
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Financial Document Analyzer API is running" }))
}

/// Successful analysis response body.
#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    status: &'static str,
    file_processed: String,
    analysis: String,
}

/// A client or server error surfaced as `{"detail": …}`.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// `POST /analyze` — validate the upload, persist it transiently, run the
/// pipeline, and clean up regardless of outcome.
async fn analyze_document(
    State(config): State<Arc<AnalyzerConfig>>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;
    let mut query = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                filename = field.file_name().map(|s| s.to_string());
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Unreadable file field: {e}")))?
                        .to_vec(),
                );
            }
            Some("query") => {
                query = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable query field: {e}")))?;
            }
            _ => {}
        }
    }

    // Validation happens before anything touches the filesystem.
    let filename = filename.ok_or_else(|| ApiError::bad_request("Missing 'file' field."))?;
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::bad_request("Only PDF files are supported."));
    }

    let content = content.ok_or_else(|| ApiError::bad_request("Missing 'file' field."))?;
    if content.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty."));
    }

    let query = effective_query(&query);

    let upload = TransientUpload::create(&config.storage_dir, &content)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store upload: {e}")))?;

    info!(
        "Processing '{}' ({} bytes) at {}",
        filename,
        content.len(),
        upload.path().display()
    );

    // The upload guard stays alive across the await and removes the file on
    // every exit path once the handler returns.
    let output = analyze(&query, upload.path(), &config)
        .await
        .map_err(|e| ApiError::internal(format!("Error processing financial document: {e}")))?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        file_processed: filename,
        analysis: output.analysis,
    }))
}

/// Trim the caller's query, substituting the default when absent or blank.
pub fn effective_query(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// RAII guard owning one per-request transient file.
pub struct TransientUpload {
    path: PathBuf,
}

impl TransientUpload {
    /// Write `content` to a uniquely named file under `storage_dir`,
    /// creating the directory on demand.
    pub async fn create(storage_dir: &Path, content: &[u8]) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(storage_dir).await?;
        let path = storage_dir.join(format!("financial_document_{}.pdf", Uuid::new_v4()));
        tokio::fs::write(&path, content).await?;
        Ok(Self { path })
    }

    /// Path to the transient file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientUpload {
    fn drop(&mut self) {
        // Cleanup failures are swallowed: the caller already has a response.
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!("Failed to remove transient file '{}': {e}", self.path.display());
            }
        }
    }
}
