//! staffing-runner: headless front end for the Erlang C staffing model.
//!
//! Usage:
//!   staffing-runner resource      --rate 100 --duration 180 --target 20 --goal-pct 90 --interval 30
//!   staffing-runner service-level --agents 15 --rate 100 --duration 180 --target 20 --interval 30
//!   staffing-runner erlang-c      --agents 15 --rate 100 --duration 180 --interval 30
//!   staffing-runner intensity     --rate 100 --duration 180 --interval 30
//!   staffing-runner simulate      --agents 15 --rate 100 --rate-sd 10 --duration 180 \
//!                                 --duration-sd 20 --target 20 --interval 30 --sims 1000 --seed 42
//!
//! Common flags: --config model.json, --json, --max-agents N,
//! --sampling marginal|joint, --truncate-negative.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use staffing_core::{
    config::ModelConfig,
    erlang::erlang_c,
    rng::{RngBank, SamplingStream},
    sampling::NegativeSamplePolicy,
    service_level::{service_level, service_level_mc_with, SamplingMode},
    staffing::StaffingPlan,
    summary::{histogram, Histogram, SampleSummary},
    ServiceGoal, StaffingOutcome, Workload, WorkloadUncertainty,
};
use std::{env, num::NonZeroU32};

const HISTOGRAM_BINS: usize = 20;

#[derive(Serialize)]
struct PointReport {
    workload:  Workload,
    intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    agents:    Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target:    Option<f64>,
    value:     f64,
}

#[derive(Serialize)]
struct SimulationReport {
    seed:        u64,
    agents:      u32,
    target:      f64,
    sampling:    SamplingMode,
    uncertainty: WorkloadUncertainty,
    summary:     SampleSummary,
    histogram:   Histogram,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1).filter(|a| !a.starts_with("--")) else {
        bail!("missing command (intensity | erlang-c | service-level | resource | simulate)");
    };

    let config = load_config(&args)?;
    let json = args.iter().any(|a| a == "--json");

    match command.as_str() {
        "intensity" => {
            let workload = workload_from_args(&args, &config)?;
            let report = PointReport {
                workload,
                intensity: workload.intensity(),
                agents: None,
                target: None,
                value: workload.intensity(),
            };
            print_point(&report, "intensity (Erlangs)", json)
        }
        "erlang-c" => {
            let workload = workload_from_args(&args, &config)?;
            let agents = require_agents(&args)?;
            let report = PointReport {
                workload,
                intensity: workload.intensity(),
                agents: Some(agents),
                target: None,
                value: erlang_c(agents, &workload),
            };
            print_point(&report, "P(wait)", json)
        }
        "service-level" => {
            let workload = workload_from_args(&args, &config)?;
            let agents = require_agents(&args)?;
            let target: f64 = require_arg(&args, "--target")?;
            let report = PointReport {
                workload,
                intensity: workload.intensity(),
                agents: Some(agents),
                target: Some(target),
                value: service_level(agents, &workload, target),
            };
            print_point(&report, "service level", json)
        }
        "resource" => {
            let workload = workload_from_args(&args, &config)?;
            let target: f64 = require_arg(&args, "--target")?;
            let goal = goal_from_args(&args)?;
            let plan = StaffingPlan::build(workload, target, goal, config.max_agents);
            print_plan(&plan, json)
        }
        "simulate" => run_simulation(&args, &config, json),
        other => bail!("unknown command: {other}"),
    }
}

fn load_config(args: &[String]) -> Result<ModelConfig> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };

    if let Some(interval) = parse_flag(args, "--interval")? {
        config.interval_minutes = interval;
    }
    if let Some(sims) = parse_flag(args, "--sims")? {
        config.simulations = sims;
    }
    if let Some(max_agents) = parse_flag(args, "--max-agents")? {
        config.max_agents = max_agents;
    }
    if let Some(seed) = parse_flag(args, "--seed")? {
        config.seed = Some(seed);
    }
    if args.iter().any(|a| a == "--truncate-negative") {
        config.negative_samples = NegativeSamplePolicy::TruncateAtZero;
    }
    if let Some(mode) = flag_value(args, "--sampling") {
        config.sampling = match mode {
            "marginal" => SamplingMode::Marginal,
            "joint" => SamplingMode::Joint,
            other => bail!("unknown --sampling mode: {other}"),
        };
    }

    log::debug!("config: {config:?}");
    Ok(config)
}

fn workload_from_args(args: &[String], config: &ModelConfig) -> Result<Workload> {
    let rate: f64 = require_arg(args, "--rate")?;
    let duration: f64 = require_arg(args, "--duration")?;
    Ok(Workload::new(rate, duration).with_interval(config.interval_minutes))
}

/// Exactly one of --goal (fraction) or --goal-pct (percentage).
fn goal_from_args(args: &[String]) -> Result<ServiceGoal> {
    match (flag_value(args, "--goal"), flag_value(args, "--goal-pct")) {
        (Some(_), Some(_)) => bail!("pass either --goal or --goal-pct, not both"),
        (Some(_), None) => Ok(ServiceGoal::fraction(require_arg(args, "--goal")?)?),
        (None, Some(_)) => Ok(ServiceGoal::percent(require_arg(args, "--goal-pct")?)?),
        (None, None) => bail!("missing --goal (fraction) or --goal-pct (percentage)"),
    }
}

fn run_simulation(args: &[String], config: &ModelConfig, json: bool) -> Result<()> {
    let agents = require_agents(args)?;
    let target: f64 = require_arg(args, "--target")?;
    let uncertainty = WorkloadUncertainty::new(
        require_arg(args, "--rate")?,
        require_arg(args, "--rate-sd")?,
        require_arg(args, "--duration")?,
        require_arg(args, "--duration-sd")?,
    )
    .with_interval(config.interval_minutes);

    let bank = match config.seed {
        Some(seed) => RngBank::new(seed),
        None => RngBank::from_entropy(),
    };
    log::info!("simulate: seed={} sims={} mode={:?}", bank.seed(), config.simulations, config.sampling);

    let mut rng = bank.for_stream(SamplingStream::Scenario);
    let levels = service_level_mc_with(
        config.sampling,
        &mut rng,
        agents,
        &uncertainty,
        target,
        &config.monte_carlo_options(),
    )?;

    let report = SimulationReport {
        seed: bank.seed(),
        agents,
        target,
        sampling: config.sampling,
        uncertainty,
        summary: SampleSummary::from_samples(&levels)?,
        histogram: histogram(&levels, HISTOGRAM_BINS)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let s = &report.summary;
    println!("=== SERVICE LEVEL SIMULATION ===");
    println!("  seed:        {}", report.seed);
    println!("  agents:      {agents}");
    println!("  target:      {target}s");
    println!("  sampling:    {:?}", report.sampling);
    println!("  simulations: {}", s.count);
    println!("  mean:        {:.4} (sd {:.4})", s.mean, s.sd);
    println!("  p05/p50/p95: {:.4} / {:.4} / {:.4}", s.p05, s.p50, s.p95);
    println!("  min/max:     {:.4} / {:.4}", s.min, s.max);
    println!();
    print_histogram(&report.histogram);
    Ok(())
}

fn print_point(report: &PointReport, label: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("  intensity:   {:.4} Erlangs", report.intensity);
    if let Some(agents) = report.agents {
        println!("  agents:      {agents}");
    }
    if let Some(target) = report.target {
        println!("  target:      {target}s");
    }
    println!("  {label}: {:.6}", report.value);
    Ok(())
}

fn print_plan(plan: &StaffingPlan, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }
    println!("=== STAFFING PLAN ===");
    println!("  intensity:   {:.4} Erlangs", plan.intensity);
    println!("  target:      {}s at {:.1}%", plan.target, plan.goal * 100.0);
    match plan.outcome {
        StaffingOutcome::Staffed { agents, service_level } => {
            println!("  agents:      {agents}");
            println!("  achieved:    {:.4}%", service_level * 100.0);
            if let Some(occ) = plan.occupancy {
                println!("  occupancy:   {:.1}%", occ * 100.0);
            }
            if let Some(asa) = plan.average_speed_of_answer {
                println!("  ASA:         {asa:.1}s");
            }
        }
        StaffingOutcome::Unreachable { max_agents, best_service_level } => {
            println!("  goal unreachable with up to {max_agents} agents");
            if let Some(best) = best_service_level {
                println!("  best seen:   {:.4}%", best * 100.0);
            }
        }
    }
    Ok(())
}

fn print_histogram(h: &Histogram) {
    let peak = h.counts.iter().copied().max().unwrap_or(0).max(1);
    for (i, count) in h.counts.iter().enumerate() {
        let bar = "#".repeat(count * 40 / peak);
        println!("  [{:.3}, {:.3}) {count:>5} {bar}", h.edges[i], h.edges[i + 1]);
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn require_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<T> {
    let raw = flag_value(args, flag).ok_or_else(|| anyhow!("missing {flag}"))?;
    raw.parse()
        .map_err(|_| anyhow!("invalid value for {flag}: {raw}"))
}

/// `None` when the flag is absent; an error when it is present but malformed.
fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, flag)
        .map(str::parse)
        .transpose()
        .with_context(|| format!("invalid value for {flag}"))
}

/// Agent counts start at one.
fn require_agents(args: &[String]) -> Result<u32> {
    let agents: NonZeroU32 = require_arg(args, "--agents")?;
    Ok(agents.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn malformed_override_is_rejected() {
        let args = argv("staffing-runner resource --interval 3O");
        let err = load_config(&args).unwrap_err();
        assert!(format!("{err:#}").contains("--interval"), "{err:#}");

        assert!(load_config(&argv("staffing-runner simulate --sims 1OOO")).is_err());
        assert!(load_config(&argv("staffing-runner resource --max-agents lots")).is_err());
        assert!(load_config(&argv("staffing-runner simulate --seed -1")).is_err());
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let config = load_config(&argv("staffing-runner resource")).unwrap();
        assert_eq!(config, ModelConfig::default());
    }

    #[test]
    fn well_formed_overrides_apply() {
        let config =
            load_config(&argv("staffing-runner simulate --interval 30 --sims 250 --max-agents 40 --seed 9"))
                .unwrap();
        assert_eq!(config.interval_minutes, 30.0);
        assert_eq!(config.simulations, 250);
        assert_eq!(config.max_agents, 40);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn zero_agents_rejected() {
        assert!(require_agents(&argv("staffing-runner erlang-c --agents 0")).is_err());
        assert!(require_agents(&argv("staffing-runner erlang-c --agents -2")).is_err());
        assert_eq!(require_agents(&argv("staffing-runner erlang-c --agents 15")).unwrap(), 15);
    }
}
