//! Domain logic for the content scan client.
//!
//! Everything in this crate is pure: no network and no filesystem.
//! The HTTP layer lives in `contentscan-client`, presentation in
//! `contentscan-cli`.

pub mod error;
pub mod export;
pub mod input;
pub mod progress;
pub mod scan_result;
pub mod status;
pub mod store;
pub mod summary;
pub mod types;

pub use error::CoreError;
pub use export::{ExportDocument, ExportEntry};
pub use input::{CandidateFile, InputCollector, InputSource, ScanMode, ScanRequest};
pub use progress::ProgressEvent;
pub use scan_result::ScanResult;
pub use status::RiskStatus;
pub use store::{Notice, ResultStore, ScanFailure, ScanOutcome, ScanSuccess};
pub use summary::{StatusCounts, Summary};
