//! Terminal rendering of progress, summaries, result cards and details.
//!
//! All renderers are pure functions returning `String`s; `main.rs`
//! decides where they are printed.

use std::fmt::Write as _;

use contentscan_core::error::CoreError;
use contentscan_core::progress::ProgressEvent;
use contentscan_core::scan_result::{ScanResult, MAX_RISK_SCORE};
use contentscan_core::status::RiskStatus;
use contentscan_core::store::Notice;
use contentscan_core::summary::Summary;
use contentscan_events::ScanEvent;
use tokio::sync::broadcast;

/// Risk factors shown on a card before the "more details" hint.
pub const CARD_FACTOR_LIMIT: usize = 2;

pub const MSG_NO_RISKS: &str = "No specific risks detected";
pub const MSG_NO_RISK_FACTORS: &str = "No specific risk factors detected";
pub const MSG_MORE_DETAILS: &str = "Click for more details...";

/// Width of the textual progress bar.
const PROGRESS_BAR_WIDTH: usize = 20;

pub fn render_progress(event: &ProgressEvent) -> String {
    let percent = event.percent.min(100);
    let filled = PROGRESS_BAR_WIDTH * usize::from(percent) / 100;
    format!(
        "[{}{}] {:>3}% {}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        percent,
        event.message
    )
}

pub fn render_notice(notice: &Notice) -> String {
    format!("error: {}", notice.message)
}

/// Four stat cards: safe, concerning, high risk, total.
///
/// Fails when the summary's safe count would be negative.
pub fn render_summary(summary: &Summary) -> Result<String, CoreError> {
    let counts = summary.counts()?;
    let mut out = String::new();
    for status in RiskStatus::ALL {
        let _ = writeln!(
            out,
            "{:>6}  {}",
            counts.get(status),
            status.display().caption
        );
    }
    let _ = writeln!(out, "{:>6}  Total Scanned", summary.total);
    Ok(out)
}

/// One card per result, in the given order.
pub fn render_cards<'a>(results: impl IntoIterator<Item = &'a ScanResult>) -> String {
    results
        .into_iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_card(result: &ScanResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.display_name());
    let _ = writeln!(
        out,
        "  {}/{MAX_RISK_SCORE}  [{}]  ({})",
        result.risk_score,
        result.status.label(),
        result.filename
    );

    if result.risk_factors.is_empty() {
        let _ = writeln!(out, "  {MSG_NO_RISKS}");
    } else {
        for factor in result.risk_factors.iter().take(CARD_FACTOR_LIMIT) {
            let _ = writeln!(out, "  - {factor}");
        }
        if result.risk_factors.len() > CARD_FACTOR_LIMIT {
            let _ = writeln!(out, "  {MSG_MORE_DETAILS}");
        }
    }
    out
}

/// Full detail view for one result.
pub fn render_details(result: &ScanResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis Details - {}", result.display_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "Risk Assessment");
    let _ = writeln!(
        out,
        "  {}/{MAX_RISK_SCORE}  {}",
        result.risk_score,
        result.status.label()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Risk Factors Detected");
    if result.risk_factors.is_empty() {
        let _ = writeln!(out, "  - {MSG_NO_RISK_FACTORS}");
    }
    for factor in &result.risk_factors {
        let _ = writeln!(out, "  - {factor}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations");
    let _ = writeln!(out, "  {}", result.status.recommendation());
    let _ = writeln!(out);
    let _ = writeln!(out, "Scan Information");
    let scanned = result
        .timestamp
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let _ = writeln!(out, "  Scanned: {scanned}");
    let _ = writeln!(out, "  Filename: {}", result.filename);
    out
}

/// Print progress events from the bus to stderr until the scan completes
/// or the bus goes away.
pub async fn print_progress(mut rx: broadcast::Receiver<ScanEvent>) {
    loop {
        match rx.recv().await {
            Ok(ScanEvent::Progress(event)) => eprintln!("{}", render_progress(&event)),
            Ok(ScanEvent::ScanCompleted { .. }) => break,
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Progress printer lagged behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
