//! Project initialization.
//!
//! Writes a default `survey.toml` and the data directory.

use crate::{config::SurveyConfig, log};
use anyhow::{Context, Result, bail};
use std::fs;

/// Create a new chart project at the configured root.
pub fn new_project(config: &SurveyConfig) -> Result<()> {
    let config_path = &config.config_path;
    if config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config_path.display()
        );
    }

    let root = config.get_root();
    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    fs::create_dir_all(&config.build.data)
        .with_context(|| format!("Failed to create {}", config.build.data.display()))?;

    let content = toml::to_string_pretty(&SurveyConfig::default())?;
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    log!("init"; "created {}", config_path.display());
    Ok(())
}
