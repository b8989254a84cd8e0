//! Circle-packing chart of feature usage.
//!
//! # Pipeline
//!
//! ```text
//! dataset.json ─► Dataset ─► HierarchyInput ─► LayoutEngine ─► HierarchyNode[]
//!                                                                  │
//!                        SVG ◄─ svg::write_chart ◄─ NodeVisual[] ◄─┘ HierarchyRenderer
//! ```
//!
//! [`ChartComposer`] owns the wiring; everything it calls is replaceable
//! on its own.

mod color;
mod compose;
mod dataset;
mod layout;
mod node;
mod render;
mod section;
mod svg;
mod tooltip;

pub use compose::ChartComposer;
pub use dataset::Dataset;
#[cfg(test)]
pub use section::Section;
