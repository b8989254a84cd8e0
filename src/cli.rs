//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Feature usage chart renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dataset file or directory (relative to project root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Entities file (relative to project root)
    #[arg(short, long)]
    pub entities: Option<PathBuf>,

    /// Config file name (default: survey.toml)
    #[arg(short = 'C', long, default_value = "survey.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments of the `render` command
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Clean output directory completely before rendering
    #[arg(long)]
    pub clean: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Minify the generated documents
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Chart width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default config file
    Init {
        /// the name(path) of the project directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Render every dataset into a chart
    Render {
        #[command(flatten)]
        render_args: RenderArgs,
    },

    /// Resolve entity ids or names to display names and homepages
    Entities {
        /// ids or names to resolve (case-insensitive); lists every entity when empty
        keys: Vec<String>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_render(&self) -> bool {
        matches!(self.command, Commands::Render { .. })
    }
    pub const fn is_entities(&self) -> bool {
        matches!(self.command, Commands::Entities { .. })
    }
}
