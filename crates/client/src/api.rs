//! REST client for the remote content-classification service.
//!
//! Wraps the service's HTTP endpoints (single upload, bulk scan, health)
//! using [`reqwest`] multipart bodies.

use async_trait::async_trait;
use contentscan_core::input::{CandidateFile, MIME_OCTET_STREAM};
use contentscan_core::scan_result::ScanResult;
use contentscan_core::summary::Summary;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Single-file upload endpoint.
pub const UPLOAD_PATH: &str = "/api/upload";
/// Multi-file scan endpoint.
pub const BULK_SCAN_PATH: &str = "/api/bulk-scan";
pub const HEALTH_PATH: &str = "/api/health";

/// Multipart field carrying the file of a single upload.
pub const SINGLE_FILE_FIELD: &str = "file";
/// Repeated multipart field carrying the files of a bulk scan.
pub const BULK_FILES_FIELD: &str = "files";

/// Body returned by the bulk endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkScanResponse {
    #[serde(default)]
    pub results: Vec<ScanResult>,
    pub summary: Summary,
}

/// Body returned by the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: Option<String>,
}

/// Errors from the classification service layer.
#[derive(Debug, thiserror::Error)]
pub enum ScanApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Classification service error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body, not interpreted.
        body: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("Malformed service response: {0}")]
    Decode(String),
}

/// The seam between the orchestrator and the network.
///
/// `on_sent` must be called exactly once, after the request went out and
/// before the response body is read.
#[async_trait]
pub trait ScanService: Send + Sync {
    async fn scan_single(
        &self,
        file: &CandidateFile,
        on_sent: &(dyn Fn() + Send + Sync),
    ) -> Result<ScanResult, ScanApiError>;

    async fn scan_bulk(
        &self,
        files: &[&CandidateFile],
        on_sent: &(dyn Fn() + Send + Sync),
    ) -> Result<BulkScanResponse, ScanApiError>;
}

/// HTTP client for one classification service instance.
pub struct ScanServiceApi {
    client: reqwest::Client,
    api_url: String,
}

impl ScanServiceApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:5001`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Query `GET /api/health`.
    pub async fn health(&self) -> Result<HealthResponse, ScanApiError> {
        let response = self
            .client
            .get(format!("{}{HEALTH_PATH}", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn post_form(&self, path: &str, form: Form) -> Result<reqwest::Response, ScanApiError> {
        Ok(self
            .client
            .post(format!("{}{path}", self.api_url))
            .multipart(form)
            .send()
            .await?)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ScanApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ScanApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ScanApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ScanApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ScanApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ScanService for ScanServiceApi {
    async fn scan_single(
        &self,
        file: &CandidateFile,
        on_sent: &(dyn Fn() + Send + Sync),
    ) -> Result<ScanResult, ScanApiError> {
        let form = single_form(file)?;
        let response = self.post_form(UPLOAD_PATH, form).await?;
        on_sent();
        Self::parse_response(response).await
    }

    async fn scan_bulk(
        &self,
        files: &[&CandidateFile],
        on_sent: &(dyn Fn() + Send + Sync),
    ) -> Result<BulkScanResponse, ScanApiError> {
        let form = bulk_form(files)?;
        let response = self.post_form(BULK_SCAN_PATH, form).await?;
        on_sent();
        Self::parse_response(response).await
    }
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// A file part carrying the candidate's MIME type. An empty or unparseable
/// type falls back to `application/octet-stream` so the upload still goes out.
fn file_part(file: &CandidateFile) -> Result<Part, ScanApiError> {
    let part = || Part::bytes(file.data.clone()).file_name(file.name.clone());
    match part().mime_str(&file.mime_type) {
        Ok(part) => Ok(part),
        Err(e) => {
            tracing::debug!(
                file = %file.name,
                mime_type = %file.mime_type,
                error = %e,
                "Unusable MIME type, sending as octet-stream",
            );
            Ok(part().mime_str(MIME_OCTET_STREAM)?)
        }
    }
}

/// One part named `file`.
fn single_form(file: &CandidateFile) -> Result<Form, ScanApiError> {
    Ok(Form::new().part(SINGLE_FILE_FIELD, file_part(file)?))
}

/// One `files` part per file, in order. Callers pass pre-filtered files.
fn bulk_form(files: &[&CandidateFile]) -> Result<Form, ScanApiError> {
    files.iter().try_fold(Form::new(), |form, file| {
        Ok(form.part(BULK_FILES_FIELD, file_part(file)?))
    })
}
