//! Day/shift/interaction schedule construction
//!
//! The builder walks days, shifts within each day, and interactions within
//! each shift, pulling pairs from the weighted sampler, wells from the plate
//! layout, and volumes from the clamped-Gaussian models. Events land in an
//! exclusively-owned [`Timeline`] in emit order; each interaction's logical
//! position is converted into an absolute offset from run start.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info};

use crate::events::{CleanTargetInfo, Event, InteractionInfo, Timeline};
use crate::sampling::{InteractionSampler, VolumeModel};
use crate::schedule::{ScheduleError, ScheduleResult, TipBudget};
use crate::types::{Capacities, Category, Shift, SimulationConfig};
use crate::wells::PlateLayout;

/// Builds the full event timeline for a generation run.
pub struct ScheduleBuilder {
    config: SimulationConfig,
    caps: Capacities,
    layout: PlateLayout,
    sampler: InteractionSampler,
    transfer_volume: VolumeModel,
    clean_volume: VolumeModel,
    budget: TipBudget,
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for ScheduleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleBuilder").field("caps", &self.caps).finish()
    }
}

impl ScheduleBuilder {
    /// Prepare a builder from a validated configuration.
    ///
    /// Derives capacities, builds the probability table once, and sets up
    /// the single random stream: seeded from the configuration when a seed
    /// is present, from the OS otherwise.
    pub fn new(config: SimulationConfig) -> ScheduleResult<Self> {
        let caps = Capacities::derive(&config)?;
        let layout = PlateLayout::new(&config);
        let sampler = InteractionSampler::new(config.interaction_table()?)?;

        let transfer_volume = VolumeModel::new(
            config.transfer_base_ul,
            config.transfer_spread_ul,
            config.gauss_sigma,
            config.gauss_clamp_min,
            config.gauss_clamp_max,
        );
        let clean_volume = VolumeModel::new(
            config.clean_base_ul,
            config.clean_spread_ul,
            config.gauss_sigma,
            config.gauss_clamp_min,
            config.gauss_clamp_max,
        );

        let budget = TipBudget::new(&caps);
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };

        Ok(Self { config, caps, layout, sampler, transfer_volume, clean_volume, budget, rng })
    }

    /// The derived capacities this builder schedules against.
    pub fn capacities(&self) -> &Capacities {
        &self.caps
    }

    /// Generate the complete timeline.
    ///
    /// Any budget violation aborts before anything is produced for the
    /// caller; there are no retries and no partial artifacts.
    pub fn build(mut self) -> ScheduleResult<Timeline> {
        if self.caps.interactions_per_shift == 0 {
            return Err(ScheduleError::ResourceExhaustion {
                day: 0,
                detail: format!(
                    "small-tip capacity {} cannot fund one interaction per shift after \
                     reserving {} tips for cleaning",
                    self.caps.small_tip_capacity,
                    2 * self.caps.total_clean_count,
                ),
            });
        }

        info!(
            days = self.config.days,
            shifts_per_day = self.caps.shift_count,
            interactions_per_shift = self.caps.interactions_per_shift,
            "generating schedule"
        );

        let mut timeline = Timeline::new();
        for day in 0..self.config.days {
            self.build_day(&mut timeline, day)?;
        }

        info!(events = timeline.len(), "schedule generated");
        Ok(timeline)
    }

    fn build_day(&mut self, timeline: &mut Timeline, day: usize) -> ScheduleResult<()> {
        let day_start = self.config.day_duration() * day as u32;

        // Days after the first begin once the operator finishes overnight
        // maintenance (restocking tips, taking well samples).
        if day > 0 {
            timeline.push(Event::WaitForContinue { resume_at: day_start });
        }

        self.budget.start_day();

        let shifts = self.config.shifts.clone();
        for (shift_index, shift) in shifts.iter().copied().enumerate() {
            self.build_shift(timeline, day_start, shift_index, shift);
        }

        // End-of-day cleaning covers the shared plates; the recorded shift
        // is the day's last one.
        let last_shift = shifts[self.caps.shift_count - 1];
        for category in Category::END_OF_DAY_CLEANED {
            self.clean_category(timeline, category, 0, last_shift);
        }

        let end_of_day_time = day_start
            + (self.config.shift_duration() + self.config.end_of_shift_clean_duration())
                * self.caps.shift_count as u32
            + self.config.end_of_day_clean_duration();
        timeline.push(Event::Comment {
            seconds_after_start: end_of_day_time,
            comment: format!("Finished day {}/{}", day + 1, self.config.days),
        });
        timeline.push(Event::ResetTipRack { seconds_after_start: end_of_day_time });

        debug!(
            day,
            small_tips_used = self.budget.small().used_today(),
            "day complete"
        );
        self.budget.finish_day(day)
    }

    fn build_shift(
        &mut self,
        timeline: &mut Timeline,
        day_start: Duration,
        shift_index: usize,
        shift: Shift,
    ) {
        let shift_start = day_start
            + (self.config.shift_duration() + self.config.end_of_shift_clean_duration())
                * shift_index as u32;
        let step = self.config.shift_duration() / self.caps.interactions_per_shift as u32;

        let pairs = self.sampler.draw(&mut self.rng, self.caps.interactions_per_shift);
        debug!(%shift, shift_index, interactions = pairs.len(), "building shift");

        for (interaction_index, pair) in pairs.into_iter().enumerate() {
            let at = shift_start + step * interaction_index as u32;

            let source_range = self.layout.range_for(pair.source, shift_index);
            let target_range = self.layout.range_for(pair.target, shift_index);
            let source_well = self.rng.gen_range(source_range.start..source_range.end);
            let target_well = self.rng.gen_range(target_range.start..target_range.end);

            timeline.push(Event::Comment {
                seconds_after_start: at,
                comment: format!("Interaction: {}", pair),
            });
            timeline.push(Event::Interaction {
                seconds_after_start: at,
                interaction_info: InteractionInfo {
                    source_category: pair.source,
                    source_well_number: source_well,
                    target_category: pair.target,
                    target_well_number: target_well,
                    bacteria_transfer_ul: self.transfer_volume.sample(&mut self.rng),
                    shift,
                },
            });
            self.budget.record_interaction();
        }

        // The outgoing shift's staff wells are cleaned before the next
        // shift starts.
        for category in Category::STAFF {
            self.clean_category(timeline, category, shift_index, shift);
        }
    }

    fn clean_category(
        &mut self,
        timeline: &mut Timeline,
        category: Category,
        shift_index: usize,
        shift: Shift,
    ) {
        let range = self.layout.range_for(category, shift_index);
        for well_number in range.iter() {
            timeline.push(Event::CleanWell {
                clean_target_info: CleanTargetInfo {
                    well_category: category,
                    well_number,
                    clean_ul: self.clean_volume.sample(&mut self.rng),
                    shift,
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config(seed: u64) -> SimulationConfig {
        SimulationConfig { seed: Some(seed), ..SimulationConfig::default() }
    }

    fn count_interactions(timeline: &Timeline) -> usize {
        timeline
            .events()
            .iter()
            .filter(|event| matches!(event, Event::Interaction { .. }))
            .count()
    }

    #[test]
    fn test_build_produces_expected_interaction_count() {
        let config = seeded_config(1);
        let caps = Capacities::derive(&config).unwrap();
        let timeline = ScheduleBuilder::new(config).unwrap().build().unwrap();

        assert_eq!(count_interactions(&timeline), caps.interactions_per_shift * 3);
    }

    #[test]
    fn test_clean_counts_match_capacities() {
        let config = seeded_config(2);
        let caps = Capacities::derive(&config).unwrap();
        let timeline = ScheduleBuilder::new(config).unwrap().build().unwrap();

        let cleans = timeline
            .events()
            .iter()
            .filter(|event| matches!(event, Event::CleanWell { .. }))
            .count();
        assert_eq!(cleans, caps.total_clean_count);
    }

    #[test]
    fn test_comment_precedes_each_interaction() {
        let config = seeded_config(3);
        let timeline = ScheduleBuilder::new(config).unwrap().build().unwrap();
        let events = timeline.events();

        for (index, event) in events.iter().enumerate() {
            if let Event::Interaction { seconds_after_start, interaction_info } = event {
                match &events[index - 1] {
                    Event::Comment { seconds_after_start: comment_at, comment } => {
                        assert_eq!(comment_at, seconds_after_start);
                        assert_eq!(
                            comment,
                            &format!(
                                "Interaction: {}_{}",
                                interaction_info.source_category,
                                interaction_info.target_category
                            )
                        );
                    }
                    other => panic!("Expected comment before interaction, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_multi_day_emits_wait_for_continue() {
        let config = SimulationConfig { days: 3, seed: Some(4), ..SimulationConfig::default() };
        let timeline = ScheduleBuilder::new(config).unwrap().build().unwrap();

        let resumes: Vec<Duration> = timeline
            .events()
            .iter()
            .filter_map(|event| match event {
                Event::WaitForContinue { resume_at } => Some(*resume_at),
                _ => None,
            })
            .collect();

        // one boundary before day 1 and one before day 2, none before day 0
        assert_eq!(
            resumes,
            vec![Duration::from_secs(86_400), Duration::from_secs(2 * 86_400)]
        );
    }

    #[test]
    fn test_interaction_wells_come_from_shift_ranges() {
        let config = seeded_config(5);
        let layout = PlateLayout::new(&config);
        let shifts = config.shifts.clone();
        let timeline = ScheduleBuilder::new(config).unwrap().build().unwrap();

        for event in timeline.events() {
            if let Event::Interaction { interaction_info, .. } = event {
                let shift_index = shifts
                    .iter()
                    .position(|shift| *shift == interaction_info.shift)
                    .unwrap();
                let source_range = layout.range_for(interaction_info.source_category, shift_index);
                let target_range = layout.range_for(interaction_info.target_category, shift_index);
                assert!(source_range.contains(interaction_info.source_well_number));
                assert!(target_range.contains(interaction_info.target_well_number));
            }
        }
    }

    #[test]
    fn test_zero_quota_fails_before_emitting() {
        // 2 * (18 * 3 + 80) = 268 reserved; capacity 269 leaves a quota of
        // 1 / 3 shifts = 0 interactions per shift.
        let config = SimulationConfig {
            small_tips_per_rack: 269,
            small_tip_racks: 1,
            seed: Some(6),
            ..SimulationConfig::default()
        };

        match ScheduleBuilder::new(config).unwrap().build() {
            Err(ScheduleError::ResourceExhaustion { day: 0, .. }) => {}
            other => panic!("Expected ResourceExhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_end_of_day_cleans_cover_shared_plates() {
        let config = seeded_config(7);
        let timeline = ScheduleBuilder::new(config).unwrap().build().unwrap();

        let mut equipment_wells = Vec::new();
        let mut surface_wells = Vec::new();
        for event in timeline.events() {
            if let Event::CleanWell { clean_target_info } = event {
                match clean_target_info.well_category {
                    Category::Equipment => equipment_wells.push(clean_target_info.well_number),
                    Category::Surface => surface_wells.push(clean_target_info.well_number),
                    _ => {}
                }
                if matches!(
                    clean_target_info.well_category,
                    Category::Equipment | Category::Surface
                ) {
                    // end-of-day cleans record the day's last shift
                    assert_eq!(clean_target_info.shift, Shift::Night);
                }
            }
        }

        assert_eq!(equipment_wells, (0..20).collect::<Vec<_>>());
        assert_eq!(surface_wells, (0..60).collect::<Vec<_>>());
    }
}
