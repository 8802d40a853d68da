//! HTTP side of the content scan client.
//!
//! Provides the REST wrapper for the classification service, the scan
//! orchestrator that drives one request per scan, and the session that
//! ties input collection, scanning and the result store together.

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod session;

pub use api::{ScanApiError, ScanService, ScanServiceApi};
pub use config::ClientConfig;
pub use orchestrator::ScanOrchestrator;
pub use session::ScanSession;
