/// Domain errors raised by the pure scan logic.
///
/// None of these are fatal: each one ends a single scan or view attempt
/// and the session returns to idle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Zero files were chosen. Callers treat this as a silent no-op.
    #[error("No files selected")]
    EmptySelection,

    /// A view or export was requested while the session holds no results.
    #[error("{0}")]
    EmptyResultSet(&'static str),

    /// The remote service returned counts that contradict each other.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    /// A scan attempt ended in a transport or application failure. The
    /// message already carries the mode prefix.
    #[error("{0}")]
    ScanFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
