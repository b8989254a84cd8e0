//! `[build]` section configuration.
//!
//! Contains input/output paths, output format and minification.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Document type written for each rendered chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone SVG document (default).
    #[default]
    Svg,
    /// HTML page embedding the SVG, with hover dimming and tooltips.
    Html,
}

impl OutputFormat {
    /// File extension for this format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
        }
    }
}

/// `[build]` section in survey.toml - render pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// data = "data"                # Dataset file or directory
/// output = "public"            # Output directory
/// entities = "entities.json"   # Entity directory source
/// format = "html"
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root", skip_serializing)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Dataset JSON file, or a directory scanned for `*.json` datasets.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Output directory for rendered charts.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Entities query result (`{ "entities": [...] }`).
    #[serde(default = "defaults::build::entities")]
    #[educe(Default = defaults::build::entities())]
    pub entities: PathBuf,

    /// Output document type.
    #[serde(default = "defaults::build::format")]
    #[educe(Default = defaults::build::format())]
    pub format: OutputFormat,

    /// Write compact documents.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before rendering.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SurveyConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config: SurveyConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.data, PathBuf::from("data"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.entities, PathBuf::from("entities.json"));
        assert_eq!(config.build.format, OutputFormat::Svg);
        assert!(!config.build.minify);
        assert!(!config.build.clean);
    }

    #[test]
    fn test_build_config_custom() {
        let config = r#"
            [build]
            data = "results/2024"
            output = "dist"
            format = "html"
            minify = true
        "#;
        let config: SurveyConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.data, PathBuf::from("results/2024"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.format, OutputFormat::Html);
        assert!(config.build.minify);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let config = r#"
            [build]
            format = "png"
        "#;
        let result: Result<SurveyConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert_eq!(OutputFormat::Html.extension(), "html");
    }
}
