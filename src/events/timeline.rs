//! Append-only event timeline
//!
//! The timeline is owned exclusively by the schedule builder during
//! construction; after validation it is persisted and never mutated again.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::events::Event;
use crate::schedule::{ScheduleError, ScheduleResult};

/// Ordered sequence of schedule events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    events: Vec<Event>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Appending is the only mutation the timeline
    /// supports.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// All events in append order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the timeline holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check that the subsequence of timestamped events is non-decreasing.
    ///
    /// Events without a timestamp (`clean_well`) are excluded from the check
    /// entirely, not treated as violations.
    pub fn validate(&self) -> ScheduleResult<()> {
        let mut previous: Option<std::time::Duration> = None;
        for (index, event) in self.events.iter().enumerate() {
            let Some(at) = event.at() else { continue };
            if let Some(prev) = previous {
                if at < prev {
                    return Err(ScheduleError::OrderingViolation {
                        index,
                        previous_secs: prev.as_secs_f64(),
                        found_secs: at.as_secs_f64(),
                    });
                }
            }
            previous = Some(at);
        }
        debug!(events = self.events.len(), "timeline ordering validated");
        Ok(())
    }

    /// Serialize the timeline as a pretty-printed JSON array.
    pub fn to_json(&self) -> ScheduleResult<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    /// Validate and persist the timeline.
    ///
    /// Validation runs first; on an ordering violation nothing is written.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> ScheduleResult<()> {
        self.validate()?;

        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_json()?.as_bytes())?;
        writer.flush()?;

        debug!(path = %path.as_ref().display(), events = self.events.len(), "event log written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CleanTargetInfo, Event};
    use crate::types::{Category, Shift};
    use std::time::Duration;

    fn comment(secs: u64) -> Event {
        Event::Comment {
            seconds_after_start: Duration::from_secs(secs),
            comment: format!("at {secs}"),
        }
    }

    fn clean() -> Event {
        Event::CleanWell {
            clean_target_info: CleanTargetInfo {
                well_category: Category::Doctor,
                well_number: 0,
                clean_ul: 35.0,
                shift: Shift::Morning,
            },
        }
    }

    #[test]
    fn test_validate_accepts_non_decreasing() {
        let mut timeline = Timeline::new();
        timeline.push(comment(0));
        timeline.push(comment(10));
        timeline.push(comment(10));
        timeline.push(comment(25));
        timeline.validate().unwrap();
    }

    #[test]
    fn test_validate_skips_untimestamped_events() {
        let mut timeline = Timeline::new();
        timeline.push(comment(50));
        // cleans sit between timestamped events without breaking the order
        timeline.push(clean());
        timeline.push(clean());
        timeline.push(comment(60));
        timeline.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_regression() {
        let mut timeline = Timeline::new();
        timeline.push(comment(100));
        timeline.push(clean());
        timeline.push(comment(40));

        match timeline.validate() {
            Err(ScheduleError::OrderingViolation { index, previous_secs, found_secs }) => {
                assert_eq!(index, 2);
                assert_eq!(previous_secs, 100.0);
                assert_eq!(found_secs, 40.0);
            }
            other => panic!("Expected OrderingViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_write_refuses_invalid_timeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut timeline = Timeline::new();
        timeline.push(comment(100));
        timeline.push(comment(40));

        assert!(timeline.write_json(&path).is_err());
        assert!(!path.exists(), "no file may be written on validation failure");
    }

    #[test]
    fn test_write_and_reread() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut timeline = Timeline::new();
        timeline.push(comment(0));
        timeline.push(clean());
        timeline.push(comment(10));
        timeline.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let restored: Vec<Event> = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, timeline.events());
    }
}
