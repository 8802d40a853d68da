//! Export report projection.
//!
//! The export is a pure, order-preserving projection of the current
//! results. Its summary counts are always recomputed from the results'
//! statuses, never copied from the summary stored at ingest time.

use serde::Serialize;

use crate::error::CoreError;
use crate::scan_result::ScanResult;
use crate::status::RiskStatus;
use crate::summary::StatusCounts;
use crate::types::Timestamp;

/// File name prefix of the downloadable report.
pub const REPORT_FILE_PREFIX: &str = "content_scan_report_";

/// Top-level export document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub scan_date: Timestamp,
    pub total_images: usize,
    pub summary: StatusCounts,
    pub results: Vec<ExportEntry>,
}

/// One exported result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportEntry {
    /// Original filename when known, storage filename otherwise.
    pub filename: String,
    pub risk_score: u8,
    pub status: RiskStatus,
    pub risk_factors: Vec<String>,
    pub timestamp: Option<Timestamp>,
}

impl From<&ScanResult> for ExportEntry {
    fn from(result: &ScanResult) -> Self {
        Self {
            filename: result.display_name().to_string(),
            risk_score: result.risk_score,
            status: result.status,
            risk_factors: result.risk_factors.clone(),
            timestamp: result.timestamp,
        }
    }
}

impl ExportDocument {
    /// Project a result set stamped with `scan_date`.
    pub fn build(results: &[ScanResult], scan_date: Timestamp) -> Self {
        Self {
            scan_date,
            total_images: results.len(),
            summary: StatusCounts::tally(results),
            results: results.iter().map(ExportEntry::from).collect(),
        }
    }

    /// `content_scan_report_<YYYY-MM-DD>.json`, dated from `scan_date`.
    pub fn file_name(&self) -> String {
        report_file_name(self.scan_date)
    }

    /// Two-space indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Internal(format!("Failed to serialize export: {e}")))
    }
}

/// Report file name for a given date.
pub fn report_file_name(date: Timestamp) -> String {
    format!("{REPORT_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}
