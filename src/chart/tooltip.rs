//! Leaf tooltips.

use super::node::{HierarchyNode, NodeKind};
use compact_str::CompactString;
use std::fmt;

/// Hover content of a feature bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub name: CompactString,
    pub awareness: f64,
    pub usage: f64,
    /// `usage / awareness` in percent, 0 without awareness.
    pub percentage: f64,
}

/// Builds the tooltip of a node, if it has one.
pub type TooltipFn = fn(&HierarchyNode) -> Option<Tooltip>;

impl Tooltip {
    /// Tooltip of a leaf; sections and the root have none.
    pub fn for_node(node: &HierarchyNode) -> Option<Self> {
        let NodeKind::Leaf(stats) = &node.kind else {
            return None;
        };
        Some(Self {
            name: node.label.clone(),
            awareness: stats.awareness,
            usage: stats.usage,
            percentage: stats.usage_ratio() * 100.0,
        })
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} aware, {} used it ({:.1}%)",
            self.name, self.awareness, self.usage, self.percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::node::LeafStats;
    use crate::chart::section::{Section, SectionId};

    fn node(kind: NodeKind) -> HierarchyNode {
        HierarchyNode {
            id: "grid".into(),
            label: "grid".into(),
            depth: 2,
            x: 0.0,
            y: 0.0,
            r: 20.0,
            kind,
        }
    }

    #[test]
    fn test_leaf_tooltip() {
        let tooltip = Tooltip::for_node(&node(NodeKind::Leaf(LeafStats {
            section: SectionId::Known(Section::Layout),
            usage: 60.0,
            awareness: 80.0,
        })))
        .unwrap();

        assert_eq!(tooltip.percentage, 75.0);
        assert_eq!(tooltip.to_string(), "grid: 80 aware, 60 used it (75.0%)");
    }

    #[test]
    fn test_zero_awareness_tooltip() {
        let tooltip = Tooltip::for_node(&node(NodeKind::Leaf(LeafStats {
            section: SectionId::Known(Section::Layout),
            usage: 3.0,
            awareness: 0.0,
        })))
        .unwrap();

        assert_eq!(tooltip.percentage, 0.0);
    }

    #[test]
    fn test_no_tooltip_for_containers() {
        assert_eq!(Tooltip::for_node(&node(NodeKind::Root)), None);
        assert_eq!(
            Tooltip::for_node(&node(NodeKind::Section {
                section: SectionId::Known(Section::Layout)
            })),
            None
        );
    }
}
