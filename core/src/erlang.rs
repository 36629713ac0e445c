//! Erlang B and Erlang C probabilities.
//!
//! Erlang B is evaluated with the recursive inverse form
//!   inv_0 = 1,  inv_i = 1 + inv_{i-1} * i / a,  B = 1 / inv_n
//! which never builds a factorial. Erlang C follows from B:
//!   C = n * B / (n - a * (1 - B))
//!
//! Stability requires a < n. Outside that regime the denominator can
//! reach zero or go negative and the result is returned as-is.

use crate::{
    error::StaffingResult,
    intensity::intensity_mc,
    sampling::MonteCarloOptions,
    types::{Agents, Erlangs, Workload, WorkloadUncertainty},
};
use rand::Rng;

/// Probability that a call is blocked in a loss system with `agents` servers.
pub fn erlang_b(agents: Agents, intensity: Erlangs) -> f64 {
    let mut inv = 1.0;
    for i in 1..=agents {
        inv = 1.0 + inv * f64::from(i) / intensity;
    }
    1.0 / inv
}

/// Probability that a call has to queue, given offered load directly.
pub fn erlang_c_from_intensity(agents: Agents, intensity: Erlangs) -> f64 {
    let n = f64::from(agents);
    let b = erlang_b(agents, intensity);
    n * b / (n - intensity * (1.0 - b))
}

/// Probability that a call has to queue. `agents` must be at least 1;
/// zero gives NaN.
pub fn erlang_c(agents: Agents, workload: &Workload) -> f64 {
    erlang_c_from_intensity(agents, workload.intensity())
}

/// One Erlang C value per sampled intensity.
pub fn erlang_c_mc<R: Rng + ?Sized>(
    rng: &mut R,
    agents: Agents,
    workload: &WorkloadUncertainty,
    options: &MonteCarloOptions,
) -> StaffingResult<Vec<f64>> {
    let intensities = intensity_mc(rng, workload, options)?;
    Ok(intensities
        .into_iter()
        .map(|a| erlang_c_from_intensity(agents, a))
        .collect())
}
