//! Input sampling for the Monte Carlo paths.
//!
//! Rate and duration are drawn from independent normal distributions.
//! Negative draws are possible when the standard deviation is large
//! relative to the mean; NegativeSamplePolicy decides what happens to them.

use crate::{
    error::{StaffingError, StaffingResult},
    types::DEFAULT_SIMULATIONS,
};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeSamplePolicy {
    /// Pass negative draws through unchanged.
    #[default]
    Keep,
    /// Clamp negative draws to zero.
    TruncateAtZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloOptions {
    pub sims:             usize,
    pub negative_samples: NegativeSamplePolicy,
}

impl Default for MonteCarloOptions {
    fn default() -> Self {
        Self {
            sims:             DEFAULT_SIMULATIONS,
            negative_samples: NegativeSamplePolicy::Keep,
        }
    }
}

impl MonteCarloOptions {
    pub fn with_sims(mut self, sims: usize) -> Self {
        self.sims = sims;
        self
    }

    pub fn with_negative_samples(mut self, policy: NegativeSamplePolicy) -> Self {
        self.negative_samples = policy;
        self
    }

    pub(crate) fn validate(&self) -> StaffingResult<()> {
        if self.sims == 0 {
            return Err(StaffingError::InvalidSimulationCount { sims: self.sims });
        }
        Ok(())
    }
}

/// Build a normal distribution for the named input.
pub fn normal(name: &'static str, mean: f64, sd: f64) -> StaffingResult<Normal<f64>> {
    if !mean.is_finite() || !sd.is_finite() || sd < 0.0 {
        return Err(StaffingError::InvalidDistribution { name, mean, sd });
    }
    Normal::new(mean, sd).map_err(|_| StaffingError::InvalidDistribution { name, mean, sd })
}

/// Apply the policy to a single draw.
pub fn apply_policy(value: f64, policy: NegativeSamplePolicy) -> f64 {
    match policy {
        NegativeSamplePolicy::Keep => value,
        NegativeSamplePolicy::TruncateAtZero => value.max(0.0),
    }
}

/// Draw `n` independent samples of the named input.
pub fn normal_samples<R: Rng + ?Sized>(
    rng: &mut R,
    name: &'static str,
    mean: f64,
    sd: f64,
    n: usize,
    policy: NegativeSamplePolicy,
) -> StaffingResult<Vec<f64>> {
    let dist = normal(name, mean, sd)?;
    let mut negatives = 0usize;
    let mut samples = Vec::with_capacity(n);
    for _ in 0..n {
        let x = dist.sample(rng);
        if x < 0.0 {
            negatives += 1;
        }
        samples.push(apply_policy(x, policy));
    }

    if negatives > 0 {
        match policy {
            NegativeSamplePolicy::Keep => log::warn!(
                "sampling: {negatives}/{n} negative {name} draws kept (mean={mean}, sd={sd})"
            ),
            NegativeSamplePolicy::TruncateAtZero => log::debug!(
                "sampling: {negatives}/{n} negative {name} draws truncated to zero"
            ),
        }
    }
    Ok(samples)
}
