mod gate;

pub use gate::GateConfig;

use crate::coverage::Statistic;

use serde::Deserialize;

#[derive(Deserialize, Default, Debug, Clone)]
pub struct Config {
    /// Gate configuration
    #[serde(default)]
    pub gate: GateConfig,
}

pub trait ConfigMerge<T> {
    fn merge_with_config(&self, config: &Config) -> T;
}

impl ConfigMerge<Self> for crate::cli::CheckArgs {
    fn merge_with_config(&self, config: &Config) -> Self {
        let stats = if self.stats.is_empty() {
            config
                .gate
                .stats
                .clone()
                .filter(|stats| !stats.is_empty())
                .unwrap_or_else(|| Statistic::DEFAULTS.to_vec())
        } else {
            self.stats.clone()
        };

        Self {
            min_coverage: self.min_coverage,
            report: self.report.clone(),
            target: self
                .target
                .clone()
                .or_else(|| config.gate.target.clone().filter(|t| !t.is_empty()))
                .or_else(|| Some(crate::cli::DEFAULT_TARGET.to_string())),
            stats,
            fail_on_missing: self.fail_on_missing || config.gate.fail_on_missing.unwrap_or(false),
            config: self.config.clone(),
        }
    }
}
