//! Risk status classification and its display metadata.
//!
//! The remote service assigns one of three statuses per image. All
//! bucketing and styling decisions go through [`RiskStatus`] and the
//! [`STATUS_TABLE`] below instead of comparing raw strings.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Closed three-way risk classification assigned by the remote service.
///
/// Ordered by severity: `Safe < Concerning < HighRisk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Safe,
    Concerning,
    HighRisk,
}

/// Presentation metadata attached to a [`RiskStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub status: RiskStatus,
    /// Wire value, e.g. `"high_risk"`.
    pub wire: &'static str,
    /// Human label, e.g. `"high risk"`.
    pub label: &'static str,
    /// Style key used by card renderers.
    pub style: &'static str,
    /// Caption on the summary stat card.
    pub caption: &'static str,
    pub recommendation: &'static str,
}

// ---------------------------------------------------------------------------
// Display table
// ---------------------------------------------------------------------------

const SAFE_RECOMMENDATION: &str = "This image appears to be safe based on automated analysis. \
Continue to monitor and use parental judgment for age-appropriate content.";

const CONCERNING_RECOMMENDATION: &str = "This image shows concerning content that may not be \
appropriate for children. Review the content and consider parental controls or restricted access.";

const HIGH_RISK_RECOMMENDATION: &str = "This image has been flagged as high risk. Consider \
reporting to appropriate authorities if it involves minors or illegal content. Remove from \
accessible locations immediately.";

/// One row per status, in severity order.
pub static STATUS_TABLE: [StatusDisplay; 3] = [
    StatusDisplay {
        status: RiskStatus::Safe,
        wire: "safe",
        label: "safe",
        style: "safe",
        caption: "Safe Images",
        recommendation: SAFE_RECOMMENDATION,
    },
    StatusDisplay {
        status: RiskStatus::Concerning,
        wire: "concerning",
        label: "concerning",
        style: "concerning",
        caption: "Concerning",
        recommendation: CONCERNING_RECOMMENDATION,
    },
    StatusDisplay {
        status: RiskStatus::HighRisk,
        wire: "high_risk",
        label: "high risk",
        style: "high-risk",
        caption: "High Risk",
        recommendation: HIGH_RISK_RECOMMENDATION,
    },
];

impl RiskStatus {
    /// All statuses in severity order.
    pub const ALL: [RiskStatus; 3] = [RiskStatus::Safe, RiskStatus::Concerning, RiskStatus::HighRisk];

    /// Look up the display row for this status.
    pub fn display(self) -> &'static StatusDisplay {
        &STATUS_TABLE[self.severity() as usize]
    }

    /// Severity rank, `0` for safe up to `2` for high risk.
    pub fn severity(self) -> u8 {
        match self {
            RiskStatus::Safe => 0,
            RiskStatus::Concerning => 1,
            RiskStatus::HighRisk => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.display().wire
    }

    pub fn label(self) -> &'static str {
        self.display().label
    }

    pub fn recommendation(self) -> &'static str {
        self.display().recommendation
    }

    /// Parse a wire value (`safe`, `concerning`, `high_risk`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        STATUS_TABLE
            .iter()
            .find(|row| row.wire == value)
            .map(|row| row.status)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown risk status: '{value}'. Valid statuses: safe, concerning, high_risk"
                ))
            })
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn table_rows_line_up_with_variants() {
        for status in RiskStatus::ALL {
            assert_eq!(status.display().status, status);
        }
    }

    #[test]
    fn severity_ordering() {
        assert!(RiskStatus::Safe < RiskStatus::Concerning);
        assert!(RiskStatus::Concerning < RiskStatus::HighRisk);
    }

    #[test]
    fn high_risk_label_has_no_underscore() {
        assert_eq!(RiskStatus::HighRisk.label(), "high risk");
        assert_eq!(RiskStatus::HighRisk.as_str(), "high_risk");
        assert_eq!(RiskStatus::HighRisk.display().style, "high-risk");
    }

    #[test]
    fn parse_accepts_wire_values() {
        assert_eq!(RiskStatus::parse("safe").unwrap(), RiskStatus::Safe);
        assert_eq!(RiskStatus::parse("concerning").unwrap(), RiskStatus::Concerning);
        assert_eq!(RiskStatus::parse("high_risk").unwrap(), RiskStatus::HighRisk);
    }

    #[test]
    fn parse_rejects_unknown_value() {
        assert_matches!(RiskStatus::parse("HIGH RISK"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&RiskStatus::HighRisk).unwrap();
        assert_eq!(json, "\"high_risk\"");
        let back: RiskStatus = serde_json::from_str("\"concerning\"").unwrap();
        assert_eq!(back, RiskStatus::Concerning);
        assert!(serde_json::from_str::<RiskStatus>("\"dangerous\"").is_err());
    }
}
