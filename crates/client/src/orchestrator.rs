//! Scan orchestration: one request per scan, progress on the side.
//!
//! [`ScanOrchestrator::run`] drives exactly one network exchange for a
//! [`ScanRequest`], publishes progress on the [`EventBus`], and maps every
//! failure into a prefixed [`ScanFailure`]. There is no retry, no timeout
//! and no per-file error granularity.

use std::sync::Arc;

use contentscan_core::input::{CandidateFile, ScanMode, ScanRequest};
use contentscan_core::progress::ProgressEvent;
use contentscan_core::store::{ScanFailure, ScanOutcome, ScanSuccess};
use contentscan_core::summary::Summary;
use contentscan_events::{EventBus, ScanEvent};

use crate::api::ScanService;

/// Runs scans against a [`ScanService`].
pub struct ScanOrchestrator<S> {
    service: Arc<S>,
    bus: Arc<EventBus>,
}

impl<S: ScanService> ScanOrchestrator<S> {
    pub fn new(service: Arc<S>, bus: Arc<EventBus>) -> Self {
        Self { service, bus }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Scan the request's files and publish the terminal outcome.
    pub async fn run(&self, request: &ScanRequest) -> ScanOutcome {
        let mode = request.mode();
        self.progress(ProgressEvent::uploading(mode, request.selected_count()));

        let outcome = match mode {
            ScanMode::Single => self.run_single(&request.files()[0]).await,
            ScanMode::Bulk => self.run_bulk(request).await,
        };

        if outcome.is_ok() {
            self.progress(ProgressEvent::complete());
        }
        self.bus.publish(ScanEvent::scan_completed(outcome.clone()));
        outcome
    }

    async fn run_single(&self, file: &CandidateFile) -> ScanOutcome {
        tracing::info!(file = %file.name, "Starting single scan");

        let on_sent = || self.progress(ProgressEvent::analyzing());
        let result = self
            .service
            .scan_single(file, &on_sent)
            .await
            .map_err(|e| {
                tracing::warn!(file = %file.name, error = %e, "Single scan request failed");
                ScanFailure::new(ScanMode::Single, e.to_string())
            })?;

        tracing::info!(
            filename = %result.filename,
            status = %result.status,
            risk_score = result.risk_score,
            "Single scan complete",
        );

        let summary = Summary::from_single(&result);
        Ok(ScanSuccess {
            results: vec![result],
            summary: Some(summary),
        })
    }

    async fn run_bulk(&self, request: &ScanRequest) -> ScanOutcome {
        let accepted: Vec<&CandidateFile> = request.accepted_files().collect();
        tracing::info!(
            selected = request.selected_count(),
            accepted = accepted.len(),
            excluded = request.excluded_count(),
            "Starting bulk scan",
        );

        let on_sent = || self.progress(ProgressEvent::analyzing());
        let response = self
            .service
            .scan_bulk(&accepted, &on_sent)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Bulk scan request failed");
                ScanFailure::new(ScanMode::Bulk, e.to_string())
            })?;

        tracing::info!(
            results = response.results.len(),
            total = response.summary.total,
            "Bulk scan complete",
        );

        Ok(ScanSuccess {
            results: response.results,
            summary: Some(response.summary),
        })
    }

    fn progress(&self, event: ProgressEvent) {
        tracing::debug!(percent = event.percent, message = %event.message, "Scan progress");
        self.bus.publish(ScanEvent::Progress(event));
    }
}
