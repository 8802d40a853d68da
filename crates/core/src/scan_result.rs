//! One classification verdict per scanned image.

use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::status::RiskStatus;
use crate::types::Timestamp;

/// Highest score the service can assign.
pub const MAX_RISK_SCORE: u8 = 100;

/// A single verdict returned by the remote service.
///
/// Created only by decoding a service response and never mutated
/// afterwards. `status` is authoritative; it is never recomputed from
/// `risk_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Storage-side identifier assigned by the service.
    pub filename: String,
    /// Name supplied by the user, preferred for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(deserialize_with = "deserialize_risk_score")]
    pub risk_score: u8,
    pub status: RiskStatus,
    #[serde(default, deserialize_with = "deserialize_risk_factors")]
    pub risk_factors: Vec<String>,
    /// Analysis time. Bulk responses omit it.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<Timestamp>,
}

impl ScanResult {
    /// Name shown to the user: the original filename when known.
    pub fn display_name(&self) -> &str {
        self.original_filename.as_deref().unwrap_or(&self.filename)
    }

    /// Decode one result from a JSON body.
    pub fn from_json(body: &str) -> Result<Self, CoreError> {
        serde_json::from_str(body)
            .map_err(|e| CoreError::Validation(format!("Malformed scan result: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Lenient decoding
// ---------------------------------------------------------------------------

/// Scores arrive as JSON numbers that may carry a fractional part. They
/// are rounded and must land in `0..=100`.
fn deserialize_risk_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    let rounded = raw.round();
    if !(0.0..=f64::from(MAX_RISK_SCORE)).contains(&rounded) {
        return Err(serde::de::Error::custom(format!(
            "risk_score must be between 0 and {MAX_RISK_SCORE}, got {raw}"
        )));
    }
    Ok(rounded as u8)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RiskFactors {
    Many(Vec<String>),
    One(String),
}

/// The service reports analysis errors as a bare string instead of a list.
fn deserialize_risk_factors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RiskFactors>::deserialize(deserializer)? {
        Some(RiskFactors::Many(list)) => list,
        Some(RiskFactors::One(single)) => vec![single],
        None => Vec::new(),
    })
}

/// Accepts RFC 3339 or a naive ISO-8601 datetime, which is taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&raw).map(Some).map_err(serde::de::Error::custom)
}

fn parse_timestamp(raw: &str) -> Result<Timestamp, String> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}
