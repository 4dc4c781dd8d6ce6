//! Clamped-Gaussian volume generation
//!
//! Transfer and cleaning volumes get plausible variance from a Gaussian draw
//! that is clamped *before* scaling, so the achievable output range is
//! exactly `[base - spread, base + spread]`.

use rand::Rng;
use rand_distr::StandardNormal;

/// Bounded randomized volume generator.
#[derive(Debug, Clone, Copy)]
pub struct VolumeModel {
    base_ul: f64,
    spread_ul: f64,
    sigma: f64,
    clamp_min: f64,
    clamp_max: f64,
}

impl VolumeModel {
    /// Create a model with an explicit base, spread, and raw-draw shape.
    pub fn new(base_ul: f64, spread_ul: f64, sigma: f64, clamp_min: f64, clamp_max: f64) -> Self {
        Self { base_ul, spread_ul, sigma, clamp_min, clamp_max }
    }

    /// Sample one volume in microliters.
    ///
    /// The raw draw `g ~ Normal(0, sigma)` is clamped into
    /// `[clamp_min, clamp_max]` and only then scaled by the spread.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let gauss: f64 = rng.sample::<f64, _>(StandardNormal) * self.sigma;
        let gauss = gauss.clamp(self.clamp_min, self.clamp_max);
        self.base_ul + gauss * self.spread_ul
    }

    /// Smallest value `sample` can return.
    pub fn min_ul(&self) -> f64 {
        self.base_ul + self.clamp_min * self.spread_ul
    }

    /// Largest value `sample` can return.
    pub fn max_ul(&self) -> f64 {
        self.base_ul + self.clamp_max * self.spread_ul
    }
}
