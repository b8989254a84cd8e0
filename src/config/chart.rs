//! `[chart]` section configuration.
//!
//! Only the canvas size and interactivity are configurable; margins, padding
//! and the colour scale are fixed by the chart itself.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[chart]` section in survey.toml - canvas settings.
///
/// # Example
/// ```toml
/// [chart]
/// width = 1000
/// height = 1000
/// interactive = false   # no hover script in HTML output
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Canvas width in pixels, margins included.
    #[serde(default = "defaults::chart::width")]
    #[educe(Default = defaults::chart::width())]
    pub width: u32,

    /// Canvas height in pixels, margins included.
    #[serde(default = "defaults::chart::height")]
    #[educe(Default = defaults::chart::height())]
    pub height: u32,

    /// Attach hover handlers and the tooltip script (HTML output only).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub interactive: bool,
}
