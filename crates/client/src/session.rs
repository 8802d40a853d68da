//! Scan session: collector, orchestrator and result store wired together.
//!
//! Data flows one way: an [`InputSource`] is collected into a
//! [`ScanRequest`] (published as `ScanRequested`), the orchestrator runs
//! it (publishing progress and `ScanCompleted`), and the outcome is
//! ingested into the [`ResultStore`]. The store is a single owned value;
//! the last ingested scan wins.

use std::sync::Arc;

use contentscan_core::error::CoreError;
use contentscan_core::export::ExportDocument;
use contentscan_core::input::{InputCollector, InputSource};
use contentscan_core::store::ResultStore;
use contentscan_core::summary::Summary;
use contentscan_core::types::Timestamp;
use contentscan_events::{EventBus, ScanEvent};

use crate::api::ScanService;
use crate::orchestrator::ScanOrchestrator;

pub struct ScanSession<S> {
    collector: InputCollector,
    orchestrator: ScanOrchestrator<S>,
    store: ResultStore,
}

impl<S: ScanService> ScanSession<S> {
    pub fn new(service: Arc<S>, bus: Arc<EventBus>) -> Self {
        Self {
            collector: InputCollector::new(),
            orchestrator: ScanOrchestrator::new(service, bus),
            store: ResultStore::new(),
        }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        self.orchestrator.bus()
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn bulk_mode(&self) -> bool {
        self.collector.bulk_mode()
    }

    /// Collect, scan and ingest one selection.
    ///
    /// An empty selection returns [`CoreError::EmptySelection`] without
    /// any network call or state change; callers treat it as a no-op.
    pub async fn submit(&mut self, source: InputSource) -> Result<Summary, CoreError> {
        let request = self.collector.collect(source)?;

        let file_names = request.files().iter().map(|f| f.name.clone()).collect();
        self.bus()
            .publish(ScanEvent::scan_requested(request.mode(), file_names));

        let outcome = self.orchestrator.run(&request).await;
        self.store.ingest(outcome)
    }

    /// Drop every result of the session.
    pub fn clear(&mut self) {
        self.store.clear();
        self.bus().publish(ScanEvent::ResultsCleared);
    }

    pub fn export(&self, now: Timestamp) -> Result<ExportDocument, CoreError> {
        self.store.to_export_document(now)
    }
}
