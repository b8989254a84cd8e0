//! Chart composition: data → layout → node visuals → SVG.

use super::color::{ColorScale, Rgb};
use super::dataset::{DataIssue, HierarchyInput, audit};
use super::layout::{LayoutEngine, LayoutSettings, PackLayout};
use super::render::{HierarchyRenderer, NodeHandlers};
use super::svg::{ChartFrame, RenderedNode, write_chart};
use super::tooltip::{Tooltip, TooltipFn};
use crate::config::{ChartConfig, ThemeConfig};
use crate::entities::EntityDirectory;
use anyhow::Result;
use compact_str::CompactString;
use rayon::prelude::*;

/// Fixed parameters of a chart kind.
///
/// Node values are always `awareness` and node identity is always `name`,
/// see [`HierarchyInput`].
#[derive(Debug, Clone, Copy)]
pub struct ChartSettings {
    /// Margin on every side, in pixels.
    pub margin: f64,
    /// Gap between sibling circles, in pixels.
    pub padding: f64,
    /// Scale whose end colour stands in for unmapped sections.
    pub colors: ColorScale,
    /// Draw leaves only, without root and section rings.
    pub leaves_only: bool,
    pub tooltip: TooltipFn,
}

impl ChartSettings {
    /// The feature usage chart.
    pub const FEATURES: Self = Self {
        margin: 2.0,
        padding: 5.0,
        colors: ColorScale::new(Rgb::WHITE, Rgb::BLUE),
        leaves_only: false,
        tooltip: Tooltip::for_node,
    };

    pub fn fallback_color(&self) -> String {
        self.colors.at(1.0).to_string()
    }
}

/// A rendered chart.
#[derive(Debug, Clone)]
pub struct Chart {
    /// Standalone `<svg>` element.
    pub svg: String,
    /// Laid-out nodes, root included.
    pub nodes: usize,
    pub leaves: usize,
    /// Data drawn with fallbacks.
    pub issues: Vec<DataIssue>,
}

/// Wires a hierarchy through layout, renderer and SVG writer.
pub struct ChartComposer<'a> {
    settings: ChartSettings,
    theme: &'a ThemeConfig,
    width: u32,
    height: u32,
    layout: &'a dyn LayoutEngine,
    handlers: NodeHandlers,
    compact: bool,
    /// Resolves leaf labels to display names.
    entities: Option<&'a EntityDirectory>,
}

impl<'a> ChartComposer<'a> {
    pub fn new(theme: &'a ThemeConfig, chart: &ChartConfig) -> Self {
        Self {
            settings: ChartSettings::FEATURES,
            theme,
            width: chart.width,
            height: chart.height,
            layout: &PackLayout,
            handlers: NodeHandlers::default(),
            compact: false,
            entities: None,
        }
    }

    #[allow(dead_code)] // Reserved API
    pub fn with_layout(mut self, layout: &'a dyn LayoutEngine) -> Self {
        self.layout = layout;
        self
    }

    /// Attach the page-script pointer handlers to every leaf.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.handlers = if interactive {
            NodeHandlers::page_script()
        } else {
            NodeHandlers::default()
        };
        self
    }

    pub fn with_entities(mut self, entities: Option<&'a EntityDirectory>) -> Self {
        self.entities = entities;
        self
    }

    /// Write SVG without indentation.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn compose(&self, root: &HierarchyInput) -> Result<Chart> {
        let issues = audit(root);

        let margin = self.settings.margin;
        let (width, height) = (f64::from(self.width), f64::from(self.height));
        let layout_settings = LayoutSettings {
            width: (width - 2.0 * margin).max(0.0),
            height: (height - 2.0 * margin).max(0.0),
            padding: self.settings.padding,
        };
        let mut nodes = self.layout.layout(root, &layout_settings);
        if let Some(entities) = self.entities {
            for node in nodes.iter_mut().filter(|node| node.is_leaf()) {
                node.label = CompactString::from(entities.resolve_name(&node.label));
            }
        }

        let fallback = self.settings.fallback_color();
        let renderer = HierarchyRenderer::new(self.theme, &self.handlers, &fallback);
        let leaves_only = self.settings.leaves_only;
        let tooltip = self.settings.tooltip;

        let rendered: Vec<RenderedNode> = nodes
            .par_iter()
            .filter(|node| !leaves_only || node.is_leaf())
            .map(|node| RenderedNode {
                visual: renderer.render(node),
                tooltip: tooltip(node),
            })
            .collect();

        let frame = ChartFrame {
            width,
            height,
            margin,
        };
        let svg = write_chart(&frame, &rendered, self.compact)?;

        Ok(Chart {
            svg,
            nodes: nodes.len(),
            leaves: nodes.iter().filter(|node| node.is_leaf()).count(),
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::node::{HierarchyNode, NodeKind};
    use crate::entities::Entity;

    fn leaf(name: &str, section: &str, usage: f64, awareness: f64) -> HierarchyInput {
        HierarchyInput {
            name: name.into(),
            section_id: Some(section.into()),
            usage: Some(usage),
            awareness: Some(awareness),
            ..Default::default()
        }
    }

    fn data() -> HierarchyInput {
        HierarchyInput {
            name: "features".into(),
            children: vec![
                HierarchyInput {
                    name: "layout".into(),
                    id: Some("layout".into()),
                    is_section: true,
                    children: vec![leaf("grid", "layout", 60.0, 90.0), leaf("subgrid", "layout", 5.0, 30.0)],
                    ..Default::default()
                },
                HierarchyInput {
                    name: "accessibility".into(),
                    is_section: true,
                    children: vec![leaf("aria", "accessibility", 1.0, 0.0)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn chart_config() -> ChartConfig {
        ChartConfig {
            width: 400,
            height: 300,
            ..Default::default()
        }
    }

    /// Places every node at the same spot.
    struct StackLayout;

    impl LayoutEngine for StackLayout {
        fn layout(&self, root: &HierarchyInput, _: &LayoutSettings) -> Vec<HierarchyNode> {
            fn walk(input: &HierarchyInput, depth: usize, out: &mut Vec<HierarchyNode>) {
                out.push(HierarchyNode {
                    id: input.name.clone(),
                    label: input.name.clone(),
                    depth,
                    x: 10.0,
                    y: 10.0,
                    r: 40.0,
                    kind: NodeKind::classify(depth, input),
                });
                for child in &input.children {
                    walk(child, depth + 1, out);
                }
            }
            let mut out = Vec::new();
            walk(root, 0, &mut out);
            out
        }
    }

    #[test]
    fn test_features_settings() {
        let settings = ChartSettings::FEATURES;
        assert_eq!(settings.margin, 2.0);
        assert_eq!(settings.padding, 5.0);
        assert!(!settings.leaves_only);
        assert_eq!(settings.fallback_color(), "#0000ff");
    }

    #[test]
    fn test_compose_counts_and_issues() {
        let theme = ThemeConfig::default();
        let chart = ChartComposer::new(&theme, &chart_config())
            .compose(&data())
            .unwrap();

        assert_eq!(chart.nodes, 6);
        assert_eq!(chart.leaves, 3);
        assert_eq!(
            chart.issues,
            vec![
                DataIssue::UnmappedSection("accessibility".into()),
                DataIssue::NoAwareness("aria".into(), 0.0),
            ]
        );
        assert!(chart.svg.contains(r#"viewBox="0 0 400 300""#));
        assert!(chart.svg.contains("textcircle-accessibility"));
        assert!(chart.svg.contains(r##"stroke="#0000ff""##));
    }

    #[test]
    fn test_compose_keeps_preorder() {
        let theme = ThemeConfig::default();
        let chart = ChartComposer::new(&theme, &chart_config())
            .with_layout(&StackLayout)
            .compact(true)
            .compose(&data())
            .unwrap();

        let layout = chart.svg.find("textcircle-layout").unwrap();
        let grid = chart.svg.find(">grid</text>").unwrap();
        let subgrid = chart.svg.find(">subgrid</text>").unwrap();
        let accessibility = chart.svg.find("textcircle-accessibility").unwrap();
        assert!(layout < grid && grid < subgrid && subgrid < accessibility);
        assert!(chart.svg.contains(r##"<circle r="40" fill="#6ec6e550"/>"##));
    }

    #[test]
    fn test_interactive_toggles_handlers() {
        let theme = ThemeConfig::default();
        let static_chart = ChartComposer::new(&theme, &chart_config())
            .compose(&data())
            .unwrap();
        let interactive = ChartComposer::new(&theme, &chart_config())
            .interactive(true)
            .compose(&data())
            .unwrap();

        assert!(!static_chart.svg.contains("onmouseenter"));
        assert!(interactive.svg.contains(r#"onmouseenter="chartNodeEnter(event)""#));
        assert!(interactive.svg.contains("data-tooltip="));
    }

    #[test]
    fn test_leaf_labels_resolve_through_entities() {
        let theme = ThemeConfig::default();
        let entities = EntityDirectory::new(vec![
            Entity::new("grid", "CSS Grid", None),
            Entity::new("layout", "Layout", None),
        ]);
        let chart = ChartComposer::new(&theme, &chart_config())
            .with_entities(Some(&entities))
            .compose(&data())
            .unwrap();

        assert!(chart.svg.contains(">CSS Grid</text>"));
        assert!(chart.svg.contains(">subgrid</text>"));
        // Section rings keep their id
        assert!(chart.svg.contains(">layout</textPath>"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let theme = ThemeConfig::default();
        let composer = ChartComposer::new(&theme, &chart_config()).interactive(true);

        assert_eq!(
            composer.compose(&data()).unwrap().svg,
            composer.compose(&data()).unwrap().svg
        );
    }
}
