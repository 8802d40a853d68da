//! Progress messages emitted while a scan is in flight.
//!
//! A successful scan produces exactly three events in order: upload
//! start (0 %), analyzing (50 %) and complete (100 %). A failed scan
//! never reaches the completion event.

use std::time::Duration;

use serde::Serialize;

use crate::input::ScanMode;

/// Delay before the progress indicator is hidden after a scan ends.
pub const PROGRESS_HIDE_DELAY: Duration = Duration::from_millis(500);

pub const PERCENT_STARTED: u8 = 0;
pub const PERCENT_ANALYZING: u8 = 50;
pub const PERCENT_COMPLETE: u8 = 100;

pub const MSG_UPLOADING_SINGLE: &str = "Uploading image...";
pub const MSG_ANALYZING: &str = "Analyzing content...";
pub const MSG_COMPLETE: &str = "Analysis complete!";

/// A single progress update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// Completion percentage (0-100).
    pub percent: u8,
    pub message: String,
}

impl ProgressEvent {
    fn new(percent: u8, message: impl Into<String>) -> Self {
        Self {
            percent,
            message: message.into(),
        }
    }

    /// Initial event. For bulk scans `selected` is the pre-filter count.
    pub fn uploading(mode: ScanMode, selected: usize) -> Self {
        match mode {
            ScanMode::Single => Self::new(PERCENT_STARTED, MSG_UPLOADING_SINGLE),
            ScanMode::Bulk => Self::new(PERCENT_STARTED, format!("Uploading {selected} images...")),
        }
    }

    /// Request sent, response not yet read.
    pub fn analyzing() -> Self {
        Self::new(PERCENT_ANALYZING, MSG_ANALYZING)
    }

    pub fn complete() -> Self {
        Self::new(PERCENT_COMPLETE, MSG_COMPLETE)
    }

    pub fn is_complete(&self) -> bool {
        self.percent == PERCENT_COMPLETE
    }
}
