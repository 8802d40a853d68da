//! In-process mock of the classification service for integration tests.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

/// One multipart field as the mock received it.
#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

/// One request as the mock received it.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub path: &'static str,
    pub fields: Vec<ReceivedField>,
}

#[derive(Clone, Default)]
pub struct MockState {
    pub received: Arc<Mutex<Vec<ReceivedRequest>>>,
    /// When set, every scan endpoint answers with this status.
    pub failure_status: Arc<Mutex<Option<StatusCode>>>,
    /// When set, bulk responses report this summary instead of a real one.
    pub bulk_summary: Option<serde_json::Value>,
}

impl MockState {
    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Make every later scan request answer with `status`.
    pub fn fail_with(&self, status: StatusCode) {
        *self.failure_status.lock().unwrap() = Some(status);
    }

    fn failure(&self) -> Option<StatusCode> {
        *self.failure_status.lock().unwrap()
    }
}

/// Start the mock on an ephemeral port and return its base URL.
pub async fn spawn_mock(state: MockState) -> String {
    let app = Router::new()
        .route("/api/upload", post(upload))
        .route("/api/bulk-scan", post(bulk_scan))
        .route("/api/health", get(health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn read_fields(mut multipart: Multipart) -> Vec<ReceivedField> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let len = field.bytes().await.unwrap().len();
        fields.push(ReceivedField {
            name,
            file_name,
            content_type,
            len,
        });
    }
    fields
}

fn failure(status: StatusCode) -> Response {
    (status, Json(json!({"error": "Invalid file type"}))).into_response()
}

async fn upload(State(state): State<MockState>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    let original = fields
        .first()
        .and_then(|f| f.file_name.clone())
        .unwrap_or_default();
    state.received.lock().unwrap().push(ReceivedRequest {
        path: "/api/upload",
        fields,
    });

    if let Some(status) = state.failure() {
        return failure(status);
    }

    Json(json!({
        "filename": format!("20240101_120000_{original}"),
        "risk_score": 75,
        "risk_factors": ["Adult: LIKELY", "Racy: POSSIBLE", "Content: Alcohol"],
        "timestamp": "2024-01-01T12:00:00.000001",
        "status": "high_risk"
    }))
    .into_response()
}

async fn bulk_scan(State(state): State<MockState>, multipart: Multipart) -> Response {
    let fields = read_fields(multipart).await;
    let results: Vec<serde_json::Value> = fields
        .iter()
        .map(|f| {
            let original = f.file_name.clone().unwrap_or_default();
            json!({
                "original_filename": original,
                "filename": format!("stored_{original}"),
                "risk_score": 35,
                "risk_factors": ["Racy: POSSIBLE"],
                "status": "concerning"
            })
        })
        .collect();
    let total = results.len();
    state.received.lock().unwrap().push(ReceivedRequest {
        path: "/api/bulk-scan",
        fields,
    });

    if let Some(status) = state.failure() {
        return failure(status);
    }

    let summary = state
        .bulk_summary
        .clone()
        .unwrap_or_else(|| json!({"total": total, "high_risk": 0, "concerning": total}));
    Json(json!({"results": results, "summary": summary})).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "timestamp": "2024-01-01T12:00:00"}))
}
