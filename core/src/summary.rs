//! Distribution summaries for Monte Carlo output.

use crate::error::{StaffingError, StaffingResult};
use serde::{Deserialize, Serialize};

fn sorted_finite(samples: &[f64]) -> Vec<f64> {
    let mut xs: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
    xs.sort_by(f64::total_cmp);
    xs
}

/// Linear interpolation between the order statistics bracketing
/// `q * (n - 1)`. Assumes `sorted` is non-empty and ascending.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

/// Quantile `q` in [0, 1] of the finite samples.
pub fn quantile(samples: &[f64], q: f64) -> StaffingResult<f64> {
    let xs = sorted_finite(samples);
    if xs.is_empty() {
        return Err(StaffingError::EmptySample);
    }
    Ok(quantile_sorted(&xs, q))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean:  f64,
    pub sd:    f64,
    pub min:   f64,
    pub max:   f64,
    pub p05:   f64,
    pub p50:   f64,
    pub p95:   f64,
}

impl SampleSummary {
    /// Non-finite samples are dropped before summarising.
    pub fn from_samples(samples: &[f64]) -> StaffingResult<Self> {
        let xs = sorted_finite(samples);
        if xs.is_empty() {
            return Err(StaffingError::EmptySample);
        }
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let sd = if xs.len() > 1 {
            (xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Ok(Self {
            count: xs.len(),
            mean,
            sd,
            min: xs[0],
            max: xs[xs.len() - 1],
            p05: quantile_sorted(&xs, 0.05),
            p50: quantile_sorted(&xs, 0.50),
            p95: quantile_sorted(&xs, 0.95),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending.
    pub edges:  Vec<f64>,
    pub counts: Vec<usize>,
}

/// Equal-width histogram over the finite samples.
pub fn histogram(samples: &[f64], bins: usize) -> StaffingResult<Histogram> {
    let xs: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
    if xs.is_empty() {
        return Err(StaffingError::EmptySample);
    }
    let bins = bins.max(1);
    let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (hi - lo) / bins as f64;

    let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for x in xs {
        let idx = if width > 0.0 {
            (((x - lo) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }
    Ok(Histogram { edges, counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() {
        let xs = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&xs, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&xs, 1.0).unwrap(), 4.0);
        assert!((quantile(&xs, 0.5).unwrap() - 2.5).abs() < 1e-12);
        assert!((quantile(&xs, 0.25).unwrap() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn nan_is_ignored() {
        let xs = [f64::NAN, 2.0, f64::NAN];
        assert_eq!(quantile(&xs, 0.5).unwrap(), 2.0);
        let s = SampleSummary::from_samples(&xs).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.sd, 0.0);
    }

    #[test]
    fn infinities_are_dropped_like_the_histogram() {
        let xs = [f64::NEG_INFINITY, 1.0, 3.0, f64::INFINITY];
        let s = SampleSummary::from_samples(&xs).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert_eq!(s.mean, 2.0);
        assert_eq!(histogram(&xs, 2).unwrap().counts.iter().sum::<usize>(), s.count);
    }

    #[test]
    fn empty_is_an_error() {
        assert!(matches!(quantile(&[], 0.5), Err(StaffingError::EmptySample)));
        assert!(SampleSummary::from_samples(&[f64::NAN]).is_err());
    }

    #[test]
    fn summary_of_small_sample() {
        let s = SampleSummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.count, 5);
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.p50, 3.0);
        assert!((s.sd - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let xs: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let h = histogram(&xs, 10).unwrap();
        assert_eq!(h.edges.len(), 11);
        assert_eq!(h.counts.iter().sum::<usize>(), 100);
        assert_eq!(h.counts[9], 10);

        let flat = histogram(&[0.5, 0.5], 4).unwrap();
        assert_eq!(flat.counts, vec![2, 0, 0, 0]);
    }
}
