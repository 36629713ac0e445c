//! Shared primitive types used across the model.

use crate::error::{StaffingError, StaffingResult};
use serde::{Deserialize, Serialize};

/// A whole number of agents.
pub type Agents = u32;

/// Offered traffic, in Erlangs.
pub type Erlangs = f64;

pub type Seconds = f64;

pub type Minutes = f64;

pub const DEFAULT_INTERVAL_MINUTES: Minutes = 60.0;

pub const DEFAULT_SIMULATIONS: usize = 1000;

/// Point-estimate workload for one interval.
///
/// `rate` is calls per interval of `interval` minutes, `duration` is the
/// mean handling time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub rate:     f64,
    pub duration: Seconds,
    pub interval: Minutes,
}

impl Workload {
    pub fn new(rate: f64, duration: Seconds) -> Self {
        Self {
            rate,
            duration,
            interval: DEFAULT_INTERVAL_MINUTES,
        }
    }

    pub fn with_interval(mut self, interval: Minutes) -> Self {
        self.interval = interval;
        self
    }

    pub fn intensity(&self) -> Erlangs {
        crate::intensity::intensity(self.rate, self.duration, self.interval)
    }
}

/// Normal-distributed uncertainty on both workload inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadUncertainty {
    pub rate_mean:     f64,
    pub rate_sd:       f64,
    pub duration_mean: Seconds,
    pub duration_sd:   Seconds,
    pub interval:      Minutes,
}

impl WorkloadUncertainty {
    pub fn new(rate_mean: f64, rate_sd: f64, duration_mean: Seconds, duration_sd: Seconds) -> Self {
        Self {
            rate_mean,
            rate_sd,
            duration_mean,
            duration_sd,
            interval: DEFAULT_INTERVAL_MINUTES,
        }
    }

    pub fn with_interval(mut self, interval: Minutes) -> Self {
        self.interval = interval;
        self
    }

    /// The workload at the means, with uncertainty dropped.
    pub fn expected(&self) -> Workload {
        Workload::new(self.rate_mean, self.duration_mean).with_interval(self.interval)
    }
}

/// Service-level goal as a fraction in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct ServiceGoal(f64);

impl ServiceGoal {
    pub fn fraction(value: f64) -> StaffingResult<Self> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(StaffingError::InvalidGoal { value })
        }
    }

    /// Percentage in (0, 100], e.g. `90.0` for 90%.
    pub fn percent(value: f64) -> StaffingResult<Self> {
        Self::fraction(value / 100.0).map_err(|_| StaffingError::InvalidGoal { value })
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for ServiceGoal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        ServiceGoal::fraction(value).map_err(serde::de::Error::custom)
    }
}

/// Result of the staffing search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StaffingOutcome {
    Staffed {
        agents:        Agents,
        service_level: f64,
    },
    /// The goal was not met at any agent count up to the search cap.
    Unreachable {
        max_agents:         Agents,
        best_service_level: Option<f64>,
    },
}

impl StaffingOutcome {
    pub fn agents(&self) -> Option<Agents> {
        match self {
            Self::Staffed { agents, .. } => Some(*agents),
            Self::Unreachable { .. } => None,
        }
    }

    pub fn is_staffed(&self) -> bool {
        matches!(self, Self::Staffed { .. })
    }
}
