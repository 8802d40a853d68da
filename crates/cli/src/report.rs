//! Writing the export report to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use contentscan_core::export::ExportDocument;

/// Write `doc` as pretty JSON into `dir` and return the file path.
pub async fn write_report(doc: &ExportDocument, dir: &Path) -> anyhow::Result<PathBuf> {
    let json = doc.to_json_pretty()?;
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Cannot create export directory {}", dir.display()))?;

    let path = dir.join(doc.file_name());
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("Cannot write report {}", path.display()))?;

    tracing::info!(path = %path.display(), images = doc.total_images, "Export report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contentscan_core::scan_result::ScanResult;
    use contentscan_core::status::RiskStatus;

    #[tokio::test]
    async fn writes_dated_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![ScanResult {
            filename: "stored.jpg".to_string(),
            original_filename: Some("dog.jpg".to_string()),
            risk_score: 5,
            status: RiskStatus::Safe,
            risk_factors: Vec::new(),
            timestamp: None,
        }];
        let date = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let doc = ExportDocument::build(&results, date);

        let path = write_report(&doc, &dir.path().join("reports")).await.unwrap();

        assert!(path.ends_with("content_scan_report_2024-06-01.json"));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["results"][0]["filename"], "dog.jpg");
        assert_eq!(written["summary"]["safe"], 1);
        assert_eq!(written["total_images"], 1);
    }
}
