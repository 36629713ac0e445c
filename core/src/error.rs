use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("Invalid service-level goal: {value} (expected a fraction in (0, 1])")]
    InvalidGoal { value: f64 },

    #[error("Invalid simulation count: {sims} (must be at least 1)")]
    InvalidSimulationCount { sims: usize },

    #[error("Invalid distribution for {name}: mean={mean}, sd={sd}")]
    InvalidDistribution {
        name: &'static str,
        mean: f64,
        sd:   f64,
    },

    #[error("Cannot summarise an empty sample")]
    EmptySample,
}

pub type StaffingResult<T> = Result<T, StaffingError>;
