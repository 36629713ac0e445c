//! Staffing resolver: smallest agent count that meets a service-level goal.
//!
//! The search starts at round(a + 1) and adds one agent at a time.
//! It stops at the first count whose service level reaches the goal, or
//! reports Unreachable once `max_agents` has been tried.

use crate::{
    service_level::{average_speed_of_answer, occupancy, service_level},
    types::{Agents, Erlangs, Seconds, ServiceGoal, StaffingOutcome, Workload},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_AGENTS: Agents = 10_000;

/// First agent count the search evaluates.
pub fn starting_agents(intensity: Erlangs) -> Agents {
    // `as` saturates, so huge loads land on u32::MAX instead of wrapping.
    (intensity + 1.0).round().max(1.0) as Agents
}

pub fn resource(
    workload: &Workload,
    target: Seconds,
    goal: ServiceGoal,
    max_agents: Agents,
) -> StaffingOutcome {
    let a = workload.intensity();
    if !a.is_finite() {
        log::warn!("staffing: intensity {a} is not finite, goal unreachable");
        return StaffingOutcome::Unreachable {
            max_agents,
            best_service_level: None,
        };
    }

    let mut best: Option<f64> = None;
    let mut agents = starting_agents(a);
    while agents <= max_agents {
        let sl = service_level(agents, workload, target);
        log::debug!("staffing: agents={agents} intensity={a:.4} service_level={sl:.6}");

        if sl >= goal.value() {
            log::info!(
                "staffing: {agents} agents reach {:.2}% (goal {:.2}%)",
                sl * 100.0,
                goal.value() * 100.0
            );
            return StaffingOutcome::Staffed {
                agents,
                service_level: sl,
            };
        }
        if !sl.is_nan() && best.map_or(true, |b| sl > b) {
            best = Some(sl);
        }
        if agents == Agents::MAX {
            break;
        }
        agents += 1;
    }

    log::warn!(
        "staffing: goal {:.4} not reached with up to {max_agents} agents (best {best:?})",
        goal.value()
    );
    StaffingOutcome::Unreachable {
        max_agents,
        best_service_level: best,
    }
}

/// Staffing outcome plus the operating figures at the chosen agent count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingPlan {
    pub workload:  Workload,
    pub target:    Seconds,
    pub goal:      f64,
    pub intensity: Erlangs,
    pub outcome:   StaffingOutcome,
    /// Only present when the goal was met.
    pub occupancy: Option<f64>,
    pub average_speed_of_answer: Option<Seconds>,
}

impl StaffingPlan {
    pub fn build(
        workload: Workload,
        target: Seconds,
        goal: ServiceGoal,
        max_agents: Agents,
    ) -> Self {
        let outcome = resource(&workload, target, goal, max_agents);
        let agents = outcome.agents();
        Self {
            workload,
            target,
            goal: goal.value(),
            intensity: workload.intensity(),
            outcome,
            occupancy: agents.map(|n| occupancy(n, &workload)),
            average_speed_of_answer: agents.map(|n| average_speed_of_answer(n, &workload)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_point_is_rounded_load_plus_one() {
        assert_eq!(starting_agents(10.0), 11);
        assert_eq!(starting_agents(10.4), 11);
        assert_eq!(starting_agents(10.6), 12);
        assert_eq!(starting_agents(-3.0), 1);
    }
}
