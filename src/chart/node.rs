//! Laid-out hierarchy nodes.

use super::dataset::HierarchyInput;
use super::section::SectionId;
use compact_str::CompactString;

/// What a node is, decided once when the hierarchy is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Invisible container at depth 0.
    Root,
    /// Labeled ring grouping the features of one section.
    Section { section: SectionId },
    /// A feature bubble.
    Leaf(LeafStats),
}

/// Survey counts of a feature.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafStats {
    pub section: SectionId,
    pub usage: f64,
    pub awareness: f64,
}

impl LeafStats {
    /// Share of aware respondents who use the feature, within `0..=1`.
    ///
    /// Zero or negative awareness yields 0.
    pub fn usage_ratio(&self) -> f64 {
        if !self.awareness.is_finite() || self.awareness <= 0.0 {
            return 0.0;
        }
        let ratio = self.usage / self.awareness;
        if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) }
    }
}

impl NodeKind {
    /// Depth 0 is the root; depth 1 is a section when flagged as one;
    /// everything else is a leaf.
    pub fn classify(depth: usize, data: &HierarchyInput) -> Self {
        match depth {
            0 => Self::Root,
            1 if data.is_section => Self::Section {
                section: SectionId::parse(data.section_key()),
            },
            _ => Self::Leaf(LeafStats {
                section: SectionId::parse(data.section_id.as_deref().unwrap_or_default()),
                usage: data.usage.unwrap_or(0.0),
                awareness: data.awareness.unwrap_or(0.0),
            }),
        }
    }
}

/// A node positioned by the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub id: CompactString,
    pub label: CompactString,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub kind: NodeKind,
}

impl HierarchyNode {
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Section;

    fn data(is_section: bool) -> HierarchyInput {
        HierarchyInput {
            name: "Layout".into(),
            id: Some("layout".into()),
            is_section,
            section_id: Some("layout".into()),
            usage: Some(5.0),
            awareness: Some(10.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_by_depth() {
        assert_eq!(NodeKind::classify(0, &data(true)), NodeKind::Root);
        assert_eq!(
            NodeKind::classify(1, &data(true)),
            NodeKind::Section {
                section: SectionId::Known(Section::Layout)
            }
        );
        assert!(matches!(NodeKind::classify(1, &data(false)), NodeKind::Leaf(_)));
        // Deeper nodes are leaves even when flagged
        assert!(matches!(NodeKind::classify(2, &data(true)), NodeKind::Leaf(_)));
    }

    #[test]
    fn test_classify_section_falls_back_to_name() {
        let input = HierarchyInput {
            name: "typography".into(),
            is_section: true,
            ..Default::default()
        };
        assert_eq!(
            NodeKind::classify(1, &input),
            NodeKind::Section {
                section: SectionId::Known(Section::Typography)
            }
        );
    }

    #[test]
    fn test_classify_leaf_without_data() {
        let input = HierarchyInput {
            name: "bare".into(),
            ..Default::default()
        };
        let NodeKind::Leaf(stats) = NodeKind::classify(2, &input) else {
            panic!("expected leaf");
        };
        assert_eq!(stats.section, SectionId::Unmapped("".into()));
        assert_eq!(stats.usage_ratio(), 0.0);
    }

    #[test]
    fn test_usage_ratio() {
        let stats = |usage, awareness| LeafStats {
            section: SectionId::Known(Section::Layout),
            usage,
            awareness,
        };
        assert_eq!(stats(5.0, 10.0).usage_ratio(), 0.5);
        assert_eq!(stats(10.0, 0.0).usage_ratio(), 0.0);
        assert_eq!(stats(10.0, -4.0).usage_ratio(), 0.0);
        assert_eq!(stats(12.0, 10.0).usage_ratio(), 1.0);
        assert_eq!(stats(-1.0, 10.0).usage_ratio(), 0.0);
        assert_eq!(stats(f64::NAN, 10.0).usage_ratio(), 0.0);
    }
}
