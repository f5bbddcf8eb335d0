use crate::cli::{CheckArgs, Config, ConfigMerge, DEFAULT_CONFIG};
use anyhow::{bail, Context, Result};
use std::{env, fs, path::PathBuf};

#[derive(Debug)]
pub struct ArgumentAggregator {
    config: Option<Config>,
    default_config_path: PathBuf,
}

impl Default for ArgumentAggregator {
    fn default() -> Self {
        let default_path = env::current_dir().unwrap_or_default().join(DEFAULT_CONFIG);
        Self {
            config: None,
            default_config_path: default_path,
        }
    }
}

impl ArgumentAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the config from the provided path, falling back to `covgate.toml`
    /// in the working directory if it exists
    ///
    /// # Errors
    /// * If an explicitly given config file does not exist
    /// * If the config file cannot be read or parsed
    pub fn load(&mut self, config_path: Option<&PathBuf>) -> Result<()> {
        let path = config_path.unwrap_or(&self.default_config_path);
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            self.config = Some(
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            );
        } else if config_path.is_some() {
            bail!("Config file not found: {}", path.display());
        }
        Ok(())
    }

    /// Merge the provided check arguments with the config
    ///
    /// Without a loaded config the defaults are applied directly.
    pub fn merge_check_args(&self, args: &CheckArgs) -> CheckArgs {
        let config = self.config.clone().unwrap_or_default();
        args.merge_with_config(&config)
    }
}
