//! Session result store.
//!
//! [`ResultStore`] is the single source of truth for the results of the
//! current session. Each successful scan replaces the whole set; nothing
//! is ever appended or merged. Failed scans leave it untouched.

use std::time::Duration;

use crate::error::CoreError;
use crate::export::ExportDocument;
use crate::input::ScanMode;
use crate::scan_result::ScanResult;
use crate::status::RiskStatus;
use crate::summary::Summary;
use crate::types::Timestamp;

/// How long a user-facing notice stays visible.
pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_secs(5);

pub const MSG_NO_RESULTS_TO_DISPLAY: &str = "No results to display";
pub const MSG_NO_RESULTS_TO_EXPORT: &str = "No results to export";

// ---------------------------------------------------------------------------
// Scan outcome
// ---------------------------------------------------------------------------

/// Results of one successful scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSuccess {
    pub results: Vec<ScanResult>,
    /// Supplied by the service for bulk scans only.
    pub summary: Option<Summary>,
}

/// A scan that ended in a transport or application failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub mode: ScanMode,
    /// Description of the underlying failure, without prefix.
    pub reason: String,
}

impl ScanFailure {
    pub fn new(mode: ScanMode, reason: impl Into<String>) -> Self {
        Self {
            mode,
            reason: reason.into(),
        }
    }

    /// User-facing message, e.g. `"Bulk scan failed: connection refused"`.
    pub fn message(&self) -> String {
        format!("{}{}", self.mode.failure_prefix(), self.reason)
    }
}

impl std::fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Terminal state of a single scan attempt.
pub type ScanOutcome = Result<ScanSuccess, ScanFailure>;

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// A transient, auto-dismissing message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dismiss_after: NOTICE_DISMISS_AFTER,
        }
    }
}

impl From<&CoreError> for Notice {
    fn from(err: &CoreError) -> Self {
        Self::new(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Holds the current result set and the summary shown alongside it.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<ScanResult>,
    summary: Option<Summary>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the outcome of a scan.
    ///
    /// On failure the store is left as it was and the prefixed message is
    /// returned as [`CoreError::ScanFailed`]. On success the result set is
    /// replaced wholesale and the display summary is returned. An empty
    /// result set or an inconsistent summary is reported as an error after
    /// the replacement has happened.
    pub fn ingest(&mut self, outcome: ScanOutcome) -> Result<Summary, CoreError> {
        let success = match outcome {
            Ok(success) => success,
            Err(failure) => {
                tracing::warn!(mode = %failure.mode, reason = %failure.reason, "Scan failed");
                return Err(CoreError::ScanFailed(failure.message()));
            }
        };

        self.results = success.results;
        self.summary = None;

        let summary = self.summary_for(success.summary)?;
        self.summary = Some(summary);

        if let Err(e) = summary.validate() {
            tracing::warn!(error = %e, "Service summary failed integrity check");
            return Err(e);
        }

        tracing::info!(
            total = summary.total,
            high_risk = summary.high_risk,
            concerning = summary.concerning,
            "Scan results ingested",
        );
        Ok(summary)
    }

    /// Summary to display: the explicit one when given, otherwise one
    /// synthesized from the lone single-scan result.
    pub fn summary_for(&self, explicit: Option<Summary>) -> Result<Summary, CoreError> {
        if self.results.is_empty() {
            return Err(CoreError::EmptyResultSet(MSG_NO_RESULTS_TO_DISPLAY));
        }
        Ok(match explicit {
            Some(summary) => summary,
            None => Summary::from_single(&self.results[0]),
        })
    }

    /// Summary stored by the last successful ingest.
    pub fn display_summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn results(&self) -> &[ScanResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Exact match on the storage `filename`.
    pub fn find_by_filename(&self, filename: &str) -> Option<&ScanResult> {
        self.results.iter().find(|r| r.filename == filename)
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&ScanResult>
    where
        P: Fn(&ScanResult) -> bool,
    {
        self.results.iter().filter(|r| predicate(r)).collect()
    }

    pub fn filter_by_status(&self, status: RiskStatus) -> Vec<&ScanResult> {
        self.filter(|r| r.status == status)
    }

    /// Drop all results and the display summary.
    pub fn clear(&mut self) {
        self.results.clear();
        self.summary = None;
    }

    /// Build the export document, stamped with `now`.
    pub fn to_export_document(&self, now: Timestamp) -> Result<ExportDocument, CoreError> {
        if self.results.is_empty() {
            return Err(CoreError::EmptyResultSet(MSG_NO_RESULTS_TO_EXPORT));
        }
        Ok(ExportDocument::build(&self.results, now))
    }
}
