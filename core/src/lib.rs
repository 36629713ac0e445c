//! Contact-centre staffing with the Erlang C queueing model.
//!
//! Data flows one way: intensity -> erlang -> service_level -> staffing.
//! Each stage has a deterministic form and a Monte Carlo form that takes
//! an explicit RNG.

pub mod config;
pub mod erlang;
pub mod error;
pub mod intensity;
pub mod rng;
pub mod sampling;
pub mod service_level;
pub mod staffing;
pub mod summary;
pub mod types;

pub use error::{StaffingError, StaffingResult};
pub use types::{ServiceGoal, StaffingOutcome, Workload, WorkloadUncertainty};
