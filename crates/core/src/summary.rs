//! Per-scan summary statistics and status tallies.
//!
//! A [`Summary`] is either supplied by the service (bulk scans) or
//! synthesized from the lone result of a single scan. The safe count is
//! always derived as `total - high_risk - concerning` and a negative
//! value is reported, never clamped.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scan_result::ScanResult;
use crate::status::RiskStatus;

/// Counts for one completed scan operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u32,
    #[serde(default)]
    pub high_risk: u32,
    #[serde(default)]
    pub concerning: u32,
}

impl Summary {
    /// Synthesize the summary of a single-file scan.
    pub fn from_single(result: &ScanResult) -> Self {
        Self {
            total: 1,
            high_risk: u32::from(result.status == RiskStatus::HighRisk),
            concerning: u32::from(result.status == RiskStatus::Concerning),
        }
    }

    /// Derived safe count.
    ///
    /// Fails with [`CoreError::DataIntegrity`] when the flagged buckets
    /// add up to more than `total`.
    pub fn safe(&self) -> Result<u32, CoreError> {
        self.total
            .checked_sub(self.high_risk)
            .and_then(|rest| rest.checked_sub(self.concerning))
            .ok_or_else(|| {
                CoreError::DataIntegrity(format!(
                    "summary reports {} high risk and {} concerning out of {} total",
                    self.high_risk, self.concerning, self.total
                ))
            })
    }

    /// Check the summary is internally consistent.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.safe().map(|_| ())
    }

    /// Expand into a three-way count, failing on integrity violations.
    pub fn counts(&self) -> Result<StatusCounts, CoreError> {
        Ok(StatusCounts {
            safe: self.safe()?,
            concerning: self.concerning,
            high_risk: self.high_risk,
        })
    }
}

/// Three-way status tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub safe: u32,
    pub concerning: u32,
    pub high_risk: u32,
}

impl StatusCounts {
    /// Count results per status by filtering on `status`.
    pub fn tally<'a>(results: impl IntoIterator<Item = &'a ScanResult>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut counts, result| {
                match result.status {
                    RiskStatus::Safe => counts.safe += 1,
                    RiskStatus::Concerning => counts.concerning += 1,
                    RiskStatus::HighRisk => counts.high_risk += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> u32 {
        self.safe + self.concerning + self.high_risk
    }

    pub fn get(&self, status: RiskStatus) -> u32 {
        match status {
            RiskStatus::Safe => self.safe,
            RiskStatus::Concerning => self.concerning,
            RiskStatus::HighRisk => self.high_risk,
        }
    }
}
