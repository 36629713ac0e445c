//! Intensity estimator: arrival rate and handling time to offered load.
//!
//! `rate` is calls per interval of `interval` minutes. Dividing by
//! 60 * interval gives calls per second; multiplying by the mean
//! handling time in seconds gives Erlangs.
//!
//! No validation: a zero interval gives a non-finite result.

use crate::{
    error::StaffingResult,
    sampling::{normal_samples, MonteCarloOptions},
    types::{Erlangs, Minutes, Seconds, WorkloadUncertainty},
};
use rand::Rng;

pub fn intensity(rate: f64, duration: Seconds, interval: Minutes) -> Erlangs {
    (rate / (60.0 * interval)) * duration
}

/// Sampled intensities, one per simulation.
///
/// All rate draws come first, then all duration draws. Sample `i` pairs
/// the i-th rate with the i-th duration.
pub fn intensity_mc<R: Rng + ?Sized>(
    rng: &mut R,
    workload: &WorkloadUncertainty,
    options: &MonteCarloOptions,
) -> StaffingResult<Vec<Erlangs>> {
    options.validate()?;
    let rates = normal_samples(
        rng,
        "rate",
        workload.rate_mean,
        workload.rate_sd,
        options.sims,
        options.negative_samples,
    )?;
    let durations = normal_samples(
        rng,
        "duration",
        workload.duration_mean,
        workload.duration_sd,
        options.sims,
        options.negative_samples,
    )?;

    Ok(rates
        .iter()
        .zip(&durations)
        .map(|(&rate, &duration)| intensity(rate, duration, workload.interval))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_erlangs() {
        assert!((intensity(100.0, 180.0, 30.0) - 10.0).abs() < 1e-12);
        assert!((intensity(60.0, 60.0, 60.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_interval_is_non_finite() {
        assert!(!intensity(100.0, 180.0, 0.0).is_finite());
    }
}
