//! Content scan event bus.
//!
//! Components talk through explicit messages instead of callbacks:
//!
//! - the input collector emits [`ScanEvent::ScanRequested`],
//! - the orchestrator emits [`ScanEvent::Progress`] and
//!   [`ScanEvent::ScanCompleted`],
//! - the presenter subscribes to all of them.
//!
//! [`EventBus`] is an in-process publish/subscribe hub backed by
//! `tokio::sync::broadcast`.

pub mod bus;

pub use bus::{EventBus, ScanEvent};
