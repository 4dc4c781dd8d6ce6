//! Error types for schedule generation

use thiserror::Error;

use crate::types::ConfigValidationError;

/// Errors that can abort a generation run.
///
/// Every variant is fatal: generation stops, nothing is written, and the
/// error surfaces to the caller. There is no silent degradation path.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Configuration validation or capacity derivation failed
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigValidationError),

    /// The per-day tip budget cannot support the schedule
    #[error("Tip budget exhausted on day {day}: {detail}")]
    ResourceExhaustion {
        /// Zero-based day the exhaustion was detected on
        day: usize,
        /// What ran out
        detail: String,
    },

    /// A timestamped event regressed relative to its predecessor; this
    /// indicates a builder defect, not bad input
    #[error(
        "Ordering violation at event {index}: timestamp {found_secs}s after {previous_secs}s"
    )]
    OrderingViolation {
        /// Index of the offending event in the timeline
        index: usize,
        /// Timestamp of the last timestamped event before it, in seconds
        previous_secs: f64,
        /// The regressed timestamp, in seconds
        found_secs: f64,
    },

    /// I/O error while persisting the event log
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while persisting the event log
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
