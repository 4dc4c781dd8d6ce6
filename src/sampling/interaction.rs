//! Weighted sampling of (source, target) category pairs
//!
//! The probability table holds relative weights, not normalized
//! probabilities; pairs are drawn with replacement in proportion to their
//! weight, and zero-weight pairs are never drawn.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::types::{CategoryPair, ConfigValidationError};

/// Draws interaction pairs from a fixed categorical weight table.
#[derive(Debug, Clone)]
pub struct InteractionSampler {
    pairs: Vec<CategoryPair>,
    dist: WeightedIndex<f64>,
}

impl InteractionSampler {
    /// Build a sampler from parsed `(pair, weight)` entries.
    ///
    /// Entry order must be deterministic for reproducible runs; the config
    /// hands the table over in key order.
    pub fn new(entries: Vec<(CategoryPair, f64)>) -> Result<Self, ConfigValidationError> {
        let weights: Vec<f64> = entries.iter().map(|(_, weight)| *weight).collect();
        let dist = WeightedIndex::new(&weights).map_err(|_| {
            // Negative and non-finite weights are rejected during config
            // validation, so the residual failure is an unusable table.
            ConfigValidationError::AllWeightsZero
        })?;
        let pairs = entries.into_iter().map(|(pair, _)| pair).collect();
        Ok(Self { pairs, dist })
    }

    /// Draw `k` pairs with replacement, proportional to the table weights.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> Vec<CategoryPair> {
        (0..k).map(|_| self.pairs[self.dist.sample(rng)]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, SimulationConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn default_sampler() -> InteractionSampler {
        let table = SimulationConfig::default().interaction_table().unwrap();
        InteractionSampler::new(table).unwrap()
    }

    #[test]
    fn test_draw_returns_requested_count() {
        let sampler = default_sampler();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sampler.draw(&mut rng, 70).len(), 70);
        assert!(sampler.draw(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_zero_weight_pairs_never_drawn() {
        let mut config = SimulationConfig::default();
        for (key, weight) in config.interaction_weights.iter_mut() {
            if key.starts_with("nurse_") {
                *weight = 0.0;
            }
        }
        let sampler = InteractionSampler::new(config.interaction_table().unwrap()).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for pair in sampler.draw(&mut rng, 100_000) {
            assert_ne!(pair.source, Category::Nurse);
        }
    }

    #[test]
    fn test_sampling_tracks_weights() {
        let sampler = default_sampler();
        let mut rng = StdRng::seed_from_u64(11);

        let mut counts: HashMap<CategoryPair, usize> = HashMap::new();
        let draws = 100_000;
        for pair in sampler.draw(&mut rng, draws) {
            *counts.entry(pair).or_default() += 1;
        }

        // patient_doctor (0.60) should land near 0.60 / 3.85 of the draws
        let pair = CategoryPair::new(Category::Patient, Category::Doctor);
        let observed = counts[&pair] as f64 / draws as f64;
        let expected = 0.60 / 3.85;
        assert!((observed - expected).abs() < 0.01, "observed {observed}, expected {expected}");
    }

    #[test]
    fn test_all_zero_table_rejected() {
        let pair = CategoryPair::new(Category::Nurse, Category::Patient);
        let result = InteractionSampler::new(vec![(pair, 0.0)]);
        assert!(matches!(result, Err(ConfigValidationError::AllWeightsZero)));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let sampler = default_sampler();
        let a = sampler.draw(&mut StdRng::seed_from_u64(3), 500);
        let b = sampler.draw(&mut StdRng::seed_from_u64(3), 500);
        assert_eq!(a, b);
    }
}
