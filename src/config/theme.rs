//! `[theme]` section configuration.
//!
//! Colours and fonts looked up by key while rendering charts.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `[theme]` section in survey.toml.
///
/// # Example
/// ```toml
/// [theme.colors]
/// background_alt = "#2b2e4a"
/// link = "#f4a3b4"
///
/// [theme.colors.ranges.feature_sections]
/// layout = "#6ec6e5"
/// typography = "#f2c86b"
///
/// [theme.charts]
/// font_family = "Inter, sans-serif"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default)]
    pub colors: ThemeColors,

    #[serde(default)]
    pub charts: ChartTheme,
}

/// `[theme.colors]` - named colours.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeColors {
    /// Fill behind section rings.
    #[serde(default = "defaults::theme::colors::background_alt")]
    #[educe(Default = defaults::theme::colors::background_alt())]
    pub background_alt: String,

    /// Base colour of section labels.
    #[serde(default = "defaults::theme::colors::link")]
    #[educe(Default = defaults::theme::colors::link())]
    pub link: String,

    #[serde(default)]
    pub ranges: ColorRanges,
}

/// `[theme.colors.ranges]` - colour sets keyed by id.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ColorRanges {
    /// Section id → hex colour.
    ///
    /// A table given in the config replaces the defaults entirely.
    #[serde(default = "defaults::theme::colors::feature_sections")]
    #[educe(Default = defaults::theme::colors::feature_sections())]
    pub feature_sections: BTreeMap<String, String>,
}

/// `[theme.charts]` - settings handed to the chart engine.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ChartTheme {
    #[serde(default = "defaults::theme::charts::font_family")]
    #[educe(Default = defaults::theme::charts::font_family())]
    pub font_family: String,

    /// Fill of leaf labels.
    #[serde(default = "defaults::theme::charts::label_color")]
    #[educe(Default = defaults::theme::charts::label_color())]
    pub label_color: String,

    #[serde(default = "defaults::theme::charts::tooltip_background")]
    #[educe(Default = defaults::theme::charts::tooltip_background())]
    pub tooltip_background: String,

    #[serde(default = "defaults::theme::charts::tooltip_color")]
    #[educe(Default = defaults::theme::charts::tooltip_color())]
    pub tooltip_color: String,
}

impl ThemeConfig {
    /// Colour of a feature section, if the theme maps it.
    #[inline]
    pub fn section_color(&self, section_id: &str) -> Option<&str> {
        self.colors
            .ranges
            .feature_sections
            .get(section_id)
            .map(String::as_str)
    }
}
