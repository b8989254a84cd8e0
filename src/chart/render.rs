//! Per-node drawing decisions.
//!
//! [`HierarchyRenderer::render`] maps one laid-out node to a [`NodeVisual`]:
//!
//! | Kind    | Visual                                                    |
//! |---------|-----------------------------------------------------------|
//! | Root    | nothing                                                   |
//! | Section | dashed ring, label curved along the ring                  |
//! | Leaf    | translucent outer circle, solid usage circle, label       |
//!
//! Rendering is pure: the same node and theme always give the same visual,
//! so nodes can be rendered in any order or in parallel.

use super::color::Fill;
use super::node::{HierarchyNode, NodeKind};
use super::section::SectionId;
use crate::config::ThemeConfig;
use compact_str::CompactString;

/// Pointer handlers the host attaches to every leaf.
///
/// The renderer only forwards them; dimming and tooltips belong to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeHandlers {
    pub on_mouse_enter: Option<CompactString>,
    pub on_mouse_move: Option<CompactString>,
    pub on_mouse_leave: Option<CompactString>,
}

impl NodeHandlers {
    /// Handlers calling the functions of the chart page script.
    pub fn page_script() -> Self {
        Self {
            on_mouse_enter: Some("chartNodeEnter(event)".into()),
            on_mouse_move: Some("chartNodeMove(event)".into()),
            on_mouse_leave: Some("chartNodeLeave(event)".into()),
        }
    }

    /// `(attribute, handler)` pairs that are set.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("onmouseenter", &self.on_mouse_enter),
            ("onmousemove", &self.on_mouse_move),
            ("onmouseleave", &self.on_mouse_leave),
        ]
        .into_iter()
        .filter_map(|(name, handler)| handler.as_deref().map(|h| (name, h)))
    }
}

/// Visual description of one node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeVisual {
    Hidden,
    Section(SectionRing),
    Leaf(LeafBubble),
}

/// Dashed section ring with a curved label.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRing {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// Section id, used for the label path id.
    pub section: CompactString,
    pub label: CompactString,
    pub color: String,
    /// Start offset of the label along the ring.
    pub label_offset: u32,
    pub background: String,
    /// Fill of the label's wrapping `<text>`.
    pub label_fill: String,
}

/// Feature bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafBubble {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// Usage circle radius, `r × usage / awareness`.
    pub inner_r: f64,
    pub outer_fill: Fill,
    pub inner_fill: String,
    pub label: CompactString,
    pub font_size: u8,
    pub label_color: String,
    pub font_family: String,
    pub handlers: NodeHandlers,
}

/// Leaf label size by outer radius.
pub const fn font_size_by_radius(radius: f64) -> u8 {
    if radius < 25.0 {
        8
    } else if radius < 35.0 {
        10
    } else if radius < 45.0 {
        12
    } else {
        14
    }
}

/// Draw callback of the chart.
pub struct HierarchyRenderer<'a> {
    theme: &'a ThemeConfig,
    handlers: &'a NodeHandlers,
    /// Colour for sections the theme does not map.
    fallback_color: &'a str,
}

impl<'a> HierarchyRenderer<'a> {
    pub const fn new(
        theme: &'a ThemeConfig,
        handlers: &'a NodeHandlers,
        fallback_color: &'a str,
    ) -> Self {
        Self {
            theme,
            handlers,
            fallback_color,
        }
    }

    pub fn render(&self, node: &HierarchyNode) -> NodeVisual {
        match &node.kind {
            NodeKind::Root => NodeVisual::Hidden,
            NodeKind::Section { section } => {
                let color = self.section_color(section);
                NodeVisual::Section(SectionRing {
                    x: node.x,
                    y: node.y,
                    r: node.r,
                    section: section.as_str().into(),
                    label: node.id.clone(),
                    color: color.to_owned(),
                    label_offset: section.label_offset(),
                    background: self.theme.colors.background_alt.clone(),
                    label_fill: self.theme.colors.link.clone(),
                })
            }
            NodeKind::Leaf(stats) => {
                let color = self.section_color(&stats.section);
                NodeVisual::Leaf(LeafBubble {
                    x: node.x,
                    y: node.y,
                    r: node.r,
                    inner_r: node.r * stats.usage_ratio(),
                    outer_fill: Fill::translucent(color),
                    inner_fill: color.to_owned(),
                    label: node.label.clone(),
                    font_size: font_size_by_radius(node.r),
                    label_color: self.theme.charts.label_color.clone(),
                    font_family: self.theme.charts.font_family.clone(),
                    handlers: self.handlers.clone(),
                })
            }
        }
    }

    fn section_color(&self, section: &SectionId) -> &'a str {
        self.theme
            .section_color(section.as_str())
            .unwrap_or(self.fallback_color)
    }
}
