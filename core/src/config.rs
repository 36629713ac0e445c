use crate::{
    sampling::{MonteCarloOptions, NegativeSamplePolicy},
    service_level::SamplingMode,
    staffing::DEFAULT_MAX_AGENTS,
    types::{Agents, Minutes, DEFAULT_INTERVAL_MINUTES, DEFAULT_SIMULATIONS},
};
use serde::{Deserialize, Serialize};

/// Model-wide settings. Every field has a default, so a config file
/// only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub interval_minutes: Minutes,
    pub simulations:      usize,
    /// Cap on the staffing search.
    pub max_agents:       Agents,
    pub negative_samples: NegativeSamplePolicy,
    pub sampling:         SamplingMode,
    /// Master seed for the RngBank. None draws one from the OS.
    pub seed:             Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            simulations:      DEFAULT_SIMULATIONS,
            max_agents:       DEFAULT_MAX_AGENTS,
            negative_samples: NegativeSamplePolicy::Keep,
            sampling:         SamplingMode::Marginal,
            seed:             None,
        }
    }
}

impl ModelConfig {
    /// Load from a JSON file.
    /// In tests, use ModelConfig::default() or from_json().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn monte_carlo_options(&self) -> MonteCarloOptions {
        MonteCarloOptions::default()
            .with_sims(self.simulations)
            .with_negative_samples(self.negative_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = ModelConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ModelConfig::default());
        assert_eq!(cfg.interval_minutes, 60.0);
        assert_eq!(cfg.simulations, 1000);
    }

    #[test]
    fn partial_override() {
        let cfg = ModelConfig::from_json(
            r#"{ "interval_minutes": 30, "negative_samples": "truncate_at_zero", "sampling": "joint", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(cfg.interval_minutes, 30.0);
        assert_eq!(cfg.negative_samples, NegativeSamplePolicy::TruncateAtZero);
        assert_eq!(cfg.sampling, SamplingMode::Joint);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.max_agents, DEFAULT_MAX_AGENTS);

        let opts = cfg.monte_carlo_options();
        assert_eq!(opts.sims, 1000);
        assert_eq!(opts.negative_samples, NegativeSamplePolicy::TruncateAtZero);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ModelConfig::load("/nonexistent/model.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
