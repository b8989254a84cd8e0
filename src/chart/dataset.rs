//! Chart datasets.
//!
//! A dataset file is either a ready hierarchy (root → sections → features)
//! or the raw survey `features` list, which is grouped into that hierarchy.
//!
//! ```json
//! { "name": "features", "children": [
//!     { "name": "Layout", "id": "layout", "isSection": true, "children": [
//!         { "name": "Grid", "sectionId": "layout", "usage": 812, "awareness": 1204 }
//!     ] }
//! ] }
//! ```

use super::section::{Section, SectionId};
use compact_str::CompactString;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Bucket id counted as usage.
pub const USED_IT: &str = "used_it";
/// Bucket id counted as awareness without usage.
pub const HEARD_IT: &str = "heard_it";

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is neither a hierarchy nor a features list")]
    Json(PathBuf, #[source] serde_json::Error),
}

// ============================================================================
// Hierarchy
// ============================================================================

/// One node of the hierarchy handed to the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyInput {
    /// Identity of the node; also its label.
    pub name: CompactString,

    /// Section key for section nodes (falls back to `name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CompactString>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_section: bool,

    /// Section a leaf belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<CompactString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awareness: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyInput>,
}

impl HierarchyInput {
    /// Key used for section colour and label lookups.
    pub fn section_key(&self) -> &str {
        self.id.as_deref().unwrap_or(self.name.as_str())
    }

    /// Layout weight of this node alone (awareness, never negative).
    pub fn own_value(&self) -> f64 {
        self.awareness
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
            .max(0.0)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, self included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

// ============================================================================
// Raw features
// ============================================================================

/// Raw survey results: `{ "features": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureDataset {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: CompactString,
    #[serde(default)]
    pub section_id: Option<CompactString>,
    pub usage: FeatureUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureUsage {
    pub buckets: Vec<UsageBucket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageBucket {
    pub id: CompactString,
    pub count: f64,
}

impl FeatureUsage {
    fn count(&self, bucket: &str) -> f64 {
        self.buckets
            .iter()
            .filter(|b| b.id == bucket)
            .map(|b| b.count)
            .sum()
    }
}

impl FeatureDataset {
    /// Group features into sections.
    ///
    /// Sections keep the order of their first feature; features without a
    /// section land in `other_features`.
    pub fn to_hierarchy(&self) -> HierarchyInput {
        let mut sections: Vec<HierarchyInput> = Vec::new();

        for feature in &self.features {
            let section_id = feature
                .section_id
                .clone()
                .unwrap_or_else(|| Section::OtherFeatures.id().into());
            let used = feature.usage.count(USED_IT);
            let leaf = HierarchyInput {
                name: feature.id.clone(),
                section_id: Some(section_id.clone()),
                usage: Some(used),
                awareness: Some(used + feature.usage.count(HEARD_IT)),
                ..Default::default()
            };

            match sections.iter_mut().find(|s| s.name == section_id) {
                Some(section) => section.children.push(leaf),
                None => sections.push(HierarchyInput {
                    name: section_id.clone(),
                    id: Some(section_id),
                    is_section: true,
                    children: vec![leaf],
                    ..Default::default()
                }),
            }
        }

        HierarchyInput {
            name: "features".into(),
            children: sections,
            ..Default::default()
        }
    }
}

// ============================================================================
// Dataset file
// ============================================================================

/// Any accepted dataset shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    Features(FeatureDataset),
    Hierarchy(HierarchyInput),
}

impl Dataset {
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content =
            fs::read(path).map_err(|err| DatasetError::Io(path.to_path_buf(), err))?;
        serde_json::from_slice(&content).map_err(|err| DatasetError::Json(path.to_path_buf(), err))
    }

    pub fn into_hierarchy(self) -> HierarchyInput {
        match self {
            Self::Features(features) => features.to_hierarchy(),
            Self::Hierarchy(root) => root,
        }
    }
}

// ============================================================================
// Data audit
// ============================================================================

/// Data problems the renderer recovers from locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataIssue {
    #[error("section `{0}` has no label offset, using fallback")]
    UnmappedSection(CompactString),

    #[error("`{0}` has no section, using fallback colour")]
    MissingSection(CompactString),

    #[error("`{0}` has awareness {1}, usage circle collapsed")]
    NoAwareness(CompactString, f64),

    #[error("`{0}` has usage {1} above awareness {2}, usage circle clamped")]
    UsageAboveAwareness(CompactString, f64, f64),
}

/// Walk the hierarchy and report everything that will be drawn with a
/// fallback. Unmapped sections are reported once each.
pub fn audit(root: &HierarchyInput) -> Vec<DataIssue> {
    let mut issues = Vec::new();
    let mut seen = FxHashSet::default();
    audit_node(root, 0, &mut seen, &mut issues);
    issues
}

fn audit_node(
    node: &HierarchyInput,
    depth: usize,
    seen: &mut FxHashSet<CompactString>,
    issues: &mut Vec<DataIssue>,
) {
    let is_section = depth == 1 && node.is_section;

    let section = match (depth, is_section) {
        (0, _) => None,
        (_, true) => Some(node.section_key()),
        _ => node.section_id.as_deref(),
    };
    if let Some(id) = section
        && !SectionId::parse(id).is_known()
        && seen.insert(id.into())
    {
        issues.push(DataIssue::UnmappedSection(id.into()));
    }

    if depth > 0 && !is_section && node.is_leaf() {
        if node.section_id.is_none() {
            issues.push(DataIssue::MissingSection(node.name.clone()));
        }
        let usage = node.usage.unwrap_or(0.0);
        let awareness = node.awareness.unwrap_or(0.0);
        if awareness <= 0.0 || !awareness.is_finite() {
            issues.push(DataIssue::NoAwareness(node.name.clone(), awareness));
        } else if usage > awareness {
            issues.push(DataIssue::UsageAboveAwareness(
                node.name.clone(),
                usage,
                awareness,
            ));
        }
    }

    for child in &node.children {
        audit_node(child, depth + 1, seen, issues);
    }
}
