//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`ScanEvent`]s. It is
//! meant to be shared via `Arc<EventBus>` between the scan session and
//! whatever renders progress and results.

use chrono::Utc;
use contentscan_core::input::ScanMode;
use contentscan_core::progress::ProgressEvent;
use contentscan_core::store::ScanOutcome;
use contentscan_core::types::Timestamp;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ScanEvent
// ---------------------------------------------------------------------------

/// A message exchanged between the scan components.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A non-empty selection was collected and a scan is about to start.
    ScanRequested {
        mode: ScanMode,
        /// File names in selection order, before any type filtering.
        file_names: Vec<String>,
        at: Timestamp,
    },

    /// Progress side channel of an in-flight scan.
    Progress(ProgressEvent),

    /// A scan reached its terminal state.
    ScanCompleted { outcome: ScanOutcome, at: Timestamp },

    /// The session's results were cleared explicitly.
    ResultsCleared,
}

impl ScanEvent {
    pub fn scan_requested(mode: ScanMode, file_names: Vec<String>) -> Self {
        ScanEvent::ScanRequested {
            mode,
            file_names,
            at: Utc::now(),
        }
    }

    pub fn scan_completed(outcome: ScanOutcome) -> Self {
        ScanEvent::ScanCompleted {
            outcome,
            at: Utc::now(),
        }
    }

    /// Short dotted name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanEvent::ScanRequested { .. } => "scan.requested",
            ScanEvent::Progress(_) => "scan.progress",
            ScanEvent::ScanCompleted { .. } => "scan.completed",
            ScanEvent::ResultsCleared => "results.cleared",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ScanEvent`].
///
/// ```rust
/// use contentscan_events::bus::{EventBus, ScanEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ScanEvent::ResultsCleared);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ScanEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no active subscribers the event is dropped.
    pub fn publish(&self, event: ScanEvent) {
        tracing::trace!(kind = event.kind(), "Publishing scan event");
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
