use serde::Deserialize;

use crate::coverage::Statistic;

#[derive(Deserialize, Default, Debug, Clone)]
pub struct GateConfig {
    /// Filename substring selecting the file to check
    pub target: Option<String>,
    /// Statistics to check
    pub stats: Option<Vec<Statistic>>,
    /// Fail when no file matches the target
    pub fail_on_missing: Option<bool>,
}
