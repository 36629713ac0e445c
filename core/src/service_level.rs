//! Service level: the fraction of calls answered within a target wait.
//!
//! Under M/M/c the conditional wait of a queued call is exponential
//! with rate (n - a) / duration, so
//!   SL = 1 - C * exp(-(n - a) * target / duration)

use crate::{
    erlang::{erlang_c, erlang_c_from_intensity, erlang_c_mc},
    error::StaffingResult,
    intensity::{intensity, intensity_mc},
    sampling::{apply_policy, normal, normal_samples, MonteCarloOptions},
    types::{Agents, Erlangs, Seconds, Workload, WorkloadUncertainty},
};
use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

/// Which sampling scheme the stochastic service level uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Erlang C term and exponential term come from independent draws.
    #[default]
    Marginal,
    /// One (rate, duration) draw per trial feeds both terms.
    Joint,
}

fn combine(agents: Agents, queue_probability: f64, intensity: Erlangs, duration: Seconds, target: Seconds) -> f64 {
    1.0 - queue_probability * (-(f64::from(agents) - intensity) * (target / duration)).exp()
}

pub fn service_level(agents: Agents, workload: &Workload, target: Seconds) -> f64 {
    combine(
        agents,
        erlang_c(agents, workload),
        workload.intensity(),
        workload.duration,
        target,
    )
}

/// Sampled service levels at a fixed agent count.
///
/// The Erlang C vector, the intensity vector and the duration vector of
/// the exponential term come from three separate sampling calls, so
/// index `i` is not one coherent scenario. Read the output as a marginal
/// distribution. See [`service_level_mc_joint`] for the coherent variant.
pub fn service_level_mc<R: Rng + ?Sized>(
    rng: &mut R,
    agents: Agents,
    workload: &WorkloadUncertainty,
    target: Seconds,
    options: &MonteCarloOptions,
) -> StaffingResult<Vec<f64>> {
    let queue_probabilities = erlang_c_mc(rng, agents, workload, options)?;
    let intensities = intensity_mc(rng, workload, options)?;
    let durations = normal_samples(
        rng,
        "duration",
        workload.duration_mean,
        workload.duration_sd,
        options.sims,
        options.negative_samples,
    )?;

    Ok(queue_probabilities
        .iter()
        .zip(&intensities)
        .zip(&durations)
        .map(|((&c, &a), &d)| combine(agents, c, a, d, target))
        .collect())
}

/// Sampled service levels where each trial is one coherent scenario.
pub fn service_level_mc_joint<R: Rng + ?Sized>(
    rng: &mut R,
    agents: Agents,
    workload: &WorkloadUncertainty,
    target: Seconds,
    options: &MonteCarloOptions,
) -> StaffingResult<Vec<f64>> {
    options.validate()?;
    let rate_dist = normal("rate", workload.rate_mean, workload.rate_sd)?;
    let duration_dist = normal("duration", workload.duration_mean, workload.duration_sd)?;

    let mut levels = Vec::with_capacity(options.sims);
    for _ in 0..options.sims {
        let rate = apply_policy(rate_dist.sample(rng), options.negative_samples);
        let duration = apply_policy(duration_dist.sample(rng), options.negative_samples);
        let a = intensity(rate, duration, workload.interval);
        levels.push(combine(agents, erlang_c_from_intensity(agents, a), a, duration, target));
    }
    Ok(levels)
}

/// Dispatch on the configured sampling mode.
pub fn service_level_mc_with<R: Rng + ?Sized>(
    mode: SamplingMode,
    rng: &mut R,
    agents: Agents,
    workload: &WorkloadUncertainty,
    target: Seconds,
    options: &MonteCarloOptions,
) -> StaffingResult<Vec<f64>> {
    match mode {
        SamplingMode::Marginal => service_level_mc(rng, agents, workload, target, options),
        SamplingMode::Joint => service_level_mc_joint(rng, agents, workload, target, options),
    }
}

/// Mean wait across all calls (ASA), in seconds.
pub fn average_speed_of_answer(agents: Agents, workload: &Workload) -> Seconds {
    erlang_c(agents, workload) * workload.duration / (f64::from(agents) - workload.intensity())
}

/// Fraction of agent time spent handling calls.
pub fn occupancy(agents: Agents, workload: &Workload) -> f64 {
    workload.intensity() / f64::from(agents)
}
