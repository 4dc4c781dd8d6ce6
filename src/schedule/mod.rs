//! Schedule generation orchestration
//!
//! Ties the allocator, samplers, and budget tracker together into one
//! sequential generation run: validate, build, validate ordering, and hand
//! the finished timeline to the caller for persistence.

pub mod budget;
pub mod builder;
pub mod error;
pub mod logging;

pub use budget::{TipBudget, TipCounter};
pub use builder::ScheduleBuilder;
pub use error::{ScheduleError, ScheduleResult};
pub use logging::LoggingConfig;

use crate::events::Timeline;
use crate::types::SimulationConfig;

/// Run one complete generation pass.
///
/// Validates the configuration, builds the timeline, and checks the
/// ordering invariant. Every failure aborts with nothing produced; callers
/// persist the result themselves (see [`Timeline::write_json`]).
pub fn generate(config: &SimulationConfig) -> ScheduleResult<Timeline> {
    config.validate()?;
    let timeline = ScheduleBuilder::new(config.clone())?.build()?;
    timeline.validate()?;
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfigValidationError;

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut config = SimulationConfig::default();
        config.shifts.clear();

        match generate(&config) {
            Err(ScheduleError::Configuration(ConfigValidationError::EmptyShiftList)) => {}
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_produces_ordered_timeline() {
        let config = SimulationConfig { seed: Some(1), ..SimulationConfig::default() };
        let timeline = generate(&config).unwrap();
        assert!(!timeline.is_empty());
        timeline.validate().unwrap();
    }
}
