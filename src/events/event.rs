//! Event records persisted to the simulation log
//!
//! The serialized shapes here are a stability contract with the downstream
//! script compiler: each record carries a `type` discriminator and the field
//! names below, with timestamps as fractional seconds after run start.
//!
//! `clean_well` records deliberately carry no timestamp; the compiler
//! schedules cleaning at execution time, and consumers must treat those
//! records as unordered relative to the timestamped ones.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::{Category, Shift};

/// Payload of an `interaction` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionInfo {
    /// Category the bacteria transfer originates from
    pub source_category: Category,
    /// Well index within the source category's plate
    pub source_well_number: usize,
    /// Category the bacteria transfer lands on
    pub target_category: Category,
    /// Well index within the target category's plate
    pub target_well_number: usize,
    /// Transferred volume in microliters
    pub bacteria_transfer_ul: f64,
    /// Shift during which the interaction happens
    pub shift: Shift,
}

/// Payload of a `clean_well` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanTargetInfo {
    /// Category owning the cleaned well
    pub well_category: Category,
    /// Well index within that category's plate
    pub well_number: usize,
    /// Cleaning volume in microliters
    pub clean_ul: f64,
    /// Shift the cleaning pass belongs to
    pub shift: Shift,
}

/// One record in the generated schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Human-readable log line emitted by the compiled script
    Comment {
        /// Offset from run start
        #[serde(with = "secs")]
        seconds_after_start: Duration,
        /// Comment text
        comment: String,
    },
    /// One contact transfer between two wells
    Interaction {
        /// Offset from run start
        #[serde(with = "secs")]
        seconds_after_start: Duration,
        /// Transfer details
        interaction_info: InteractionInfo,
    },
    /// One well-cleaning operation; unscheduled, see module docs
    CleanWell {
        /// Cleaning details
        clean_target_info: CleanTargetInfo,
    },
    /// Operator-resumed maintenance boundary between days
    WaitForContinue {
        /// Offset from run start at which the run resumes
        #[serde(with = "secs")]
        resume_at: Duration,
    },
    /// Tip racks restocked, counters start over
    #[serde(rename = "reset_tiprack")]
    ResetTipRack {
        /// Offset from run start
        #[serde(with = "secs")]
        seconds_after_start: Duration,
    },
}

impl Event {
    /// The timestamp this event carries, if any.
    ///
    /// `CleanWell` has none; ordering checks skip it rather than treating
    /// the absence as a violation.
    pub fn at(&self) -> Option<Duration> {
        match self {
            Event::Comment { seconds_after_start, .. }
            | Event::Interaction { seconds_after_start, .. }
            | Event::ResetTipRack { seconds_after_start } => Some(*seconds_after_start),
            Event::WaitForContinue { resume_at } => Some(*resume_at),
            Event::CleanWell { .. } => None,
        }
    }
}

/// Durations on the wire are fractional seconds after run start.
mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
