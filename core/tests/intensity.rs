//! Intensity estimator tests.

use staffing_core::{
    intensity::{intensity, intensity_mc},
    rng::{RngBank, SamplingStream},
    sampling::MonteCarloOptions,
    StaffingError, Workload, WorkloadUncertainty,
};

/// 100 calls per half hour at 180s each is 10 Erlangs.
#[test]
fn reference_workload_is_ten_erlangs() {
    let w = Workload::new(100.0, 180.0).with_interval(30.0);
    assert!((w.intensity() - 10.0).abs() < 1e-12);
}

#[test]
fn default_interval_is_one_hour() {
    let w = Workload::new(120.0, 180.0);
    assert_eq!(w.interval, 60.0);
    assert!((w.intensity() - 6.0).abs() < 1e-12);
}

#[test]
fn linear_in_rate_and_duration_inverse_in_interval() {
    let base = intensity(80.0, 240.0, 60.0);

    assert!((intensity(160.0, 240.0, 60.0) - 2.0 * base).abs() < 1e-9);
    assert!((intensity(80.0, 720.0, 60.0) - 3.0 * base).abs() < 1e-9);
    assert!((intensity(80.0, 240.0, 15.0) - 4.0 * base).abs() < 1e-9);
}

#[test]
fn mc_returns_one_value_per_simulation() {
    let mut rng = RngBank::new(11).for_stream(SamplingStream::Scenario);
    let uncertainty = WorkloadUncertainty::new(100.0, 10.0, 180.0, 20.0).with_interval(30.0);

    for sims in [1, 37, 1000] {
        let xs = intensity_mc(&mut rng, &uncertainty, &MonteCarloOptions::default().with_sims(sims))
            .unwrap();
        assert_eq!(xs.len(), sims);
    }
}

#[test]
fn mc_mean_near_point_estimate() {
    let mut rng = RngBank::new(2024).for_stream(SamplingStream::Scenario);
    let uncertainty = WorkloadUncertainty::new(100.0, 10.0, 180.0, 20.0).with_interval(30.0);

    let xs = intensity_mc(&mut rng, &uncertainty, &MonteCarloOptions::default().with_sims(20_000))
        .unwrap();
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;

    // Independent rate and duration, so E[a] is the product of the means.
    assert!(
        (mean - uncertainty.expected().intensity()).abs() < 0.1,
        "sample mean {mean:.4} too far from 10.0"
    );
}

#[test]
fn mc_rejects_zero_simulations() {
    let mut rng = RngBank::new(1).for_stream(SamplingStream::Scenario);
    let uncertainty = WorkloadUncertainty::new(100.0, 10.0, 180.0, 20.0);
    let err = intensity_mc(&mut rng, &uncertainty, &MonteCarloOptions::default().with_sims(0));
    assert!(matches!(err, Err(StaffingError::InvalidSimulationCount { sims: 0 })));
}
