//! survey-charts - circle-packing charts for feature usage surveys.

mod build;
mod chart;
mod cli;
mod config;
mod entities;
mod init;
mod logger;
mod utils;

use anyhow::{Result, bail};
use build::build_charts;
use clap::Parser;
use cli::{Cli, Commands};
use config::SurveyConfig;
use entities::{
    EntityDirectoryProvider, GLOBAL_ENTITIES, JsonEntitySource, describe, use_entities,
};
use init::new_project;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Init { .. } => new_project(&config),
        Commands::Render { .. } => {
            let provider = mount_entities(&config, false)?;
            let directory = provider.as_ref().map(EntityDirectoryProvider::directory);
            build_charts(&config, directory.as_deref()).map(|_| ())
        }
        Commands::Entities { keys } => {
            let _provider = mount_entities(&config, true)?;
            for line in describe(&use_entities(), keys) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SurveyConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SurveyConfig::from_path(&config_path)?
    } else {
        SurveyConfig::default()
    };
    config.update_with_cli(cli);

    if cli.is_init() && config.config_path.exists() {
        bail!("Config file already exists. Remove it manually or init in a different path.")
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Mount the entity provider on `[build.entities]`.
///
/// A missing file is an error only when entities are `required`.
fn mount_entities(
    config: &SurveyConfig,
    required: bool,
) -> Result<Option<EntityDirectoryProvider<'static>>> {
    let path = &config.build.entities;
    if !path.exists() {
        if required {
            bail!("Entities file `{}` not found", path.display());
        }
        return Ok(None);
    }

    let provider = EntityDirectoryProvider::mount(&JsonEntitySource::new(path), &GLOBAL_ENTITIES)?;
    Ok(Some(provider))
}
