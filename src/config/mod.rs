//! Project configuration management for `survey.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[build]`   | Dataset/entities/output paths, format, minify  |
//! | `[chart]`   | Canvas size and interactivity                  |
//! | `[theme]`   | Section colours, label colours, fonts          |
//!
//! # Example
//!
//! ```toml
//! [build]
//! data = "data"
//! output = "public"
//! format = "html"
//!
//! [chart]
//! width = 900
//! height = 900
//!
//! [theme.colors.ranges.feature_sections]
//! layout = "#6ec6e5"
//! ```

mod build;
mod chart;
pub mod defaults;
mod error;
mod theme;

pub use build::{BuildConfig, OutputFormat};
pub use chart::ChartConfig;
pub use theme::ThemeConfig;

use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing survey.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Paths and output settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Canvas settings
    #[serde(default)]
    pub chart: ChartConfig,

    /// Colours and fonts
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl SurveyConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SurveyConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.update_path_with_root(&root, cli);

        if let Commands::Render { render_args } = &cli.command {
            Self::update_option(&mut self.build.format, render_args.format.as_ref());
            Self::update_option(&mut self.build.minify, render_args.minify.as_ref());
            Self::update_option(&mut self.chart.width, render_args.width.as_ref());
            Self::update_option(&mut self.chart.height, render_args.height.as_ref());
            self.build.clean |= render_args.clean;
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.build.data, cli.data.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.entities, cli.entities.as_ref());

        let root = Self::normalize_path(&Self::expand_tilde(root));
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.data = Self::resolve(&root, &self.build.data);
        self.build.output = Self::resolve(&root, &self.build.output);
        self.build.entities = Self::resolve(&root, &self.build.entities);
    }

    /// Expand `~` and join relative paths onto the root
    fn resolve(root: &Path, path: &Path) -> PathBuf {
        let path = Self::expand_tilde(path);
        if path.is_relative() {
            Self::normalize_path(&root.join(path))
        } else {
            Self::normalize_path(&path)
        }
    }

    fn expand_tilde(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
            None => path.to_path_buf(),
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if self.chart.width == 0 || self.chart.height == 0 {
            bail!(ConfigError::Validation(
                "[chart.width] and [chart.height] must be positive".into()
            ));
        }

        let colors = &self.theme.colors;
        if colors.background_alt.trim().is_empty() || colors.link.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[theme.colors] entries must not be empty".into()
            ));
        }

        if let Some((id, _)) = colors
            .ranges
            .feature_sections
            .iter()
            .find(|(_, color)| color.trim().is_empty())
        {
            bail!(ConfigError::Validation(format!(
                "[theme.colors.ranges.feature_sections.{id}] must not be empty"
            )));
        }

        if let Some(Commands::Render { .. }) = self.cli.map(|cli| &cli.command)
            && !self.build.data.exists()
        {
            bail!(ConfigError::Validation(format!(
                "[build.data] `{}` not found",
                self.build.data.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
