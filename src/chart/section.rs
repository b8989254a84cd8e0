//! Feature sections.
//!
//! The survey groups features into a fixed set of sections. Each section is
//! drawn as a dashed ring whose label follows the ring; the label start
//! offset is hand-tuned per section so labels avoid the leaf bubbles.

use compact_str::CompactString;
use std::fmt;

/// Label offset for section ids outside the known set.
pub const FALLBACK_LABEL_OFFSET: u32 = 0;

/// Known feature sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Layout,
    ShapesGraphics,
    Interactions,
    Typography,
    AnimationsTransforms,
    MediaQueries,
    OtherFeatures,
}

impl Section {
    pub const ALL: [Self; 7] = [
        Self::Layout,
        Self::ShapesGraphics,
        Self::Interactions,
        Self::Typography,
        Self::AnimationsTransforms,
        Self::MediaQueries,
        Self::OtherFeatures,
    ];

    /// Section id as it appears in datasets and theme keys.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::ShapesGraphics => "shapes_graphics",
            Self::Interactions => "interactions",
            Self::Typography => "typography",
            Self::AnimationsTransforms => "animations_transforms",
            Self::MediaQueries => "media_queries",
            Self::OtherFeatures => "other_features",
        }
    }

    /// Start offset of the curved label, in pixels along the ring.
    pub const fn label_offset(self) -> u32 {
        match self {
            Self::Layout => 75,
            Self::ShapesGraphics => 320,
            Self::Interactions => 100,
            Self::Typography => 320,
            Self::AnimationsTransforms => 50,
            Self::MediaQueries => 0,
            Self::OtherFeatures => 135,
        }
    }

    /// Exact (case-sensitive) id match.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.id() == id)
    }
}

/// Section reference carried by hierarchy nodes.
///
/// Ids outside the known set are kept so the theme can still be consulted,
/// but they fall back to [`FALLBACK_LABEL_OFFSET`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionId {
    Known(Section),
    Unmapped(CompactString),
}

impl SectionId {
    pub fn parse(id: &str) -> Self {
        Section::from_id(id).map_or_else(|| Self::Unmapped(id.into()), Self::Known)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(section) => section.id(),
            Self::Unmapped(id) => id.as_str(),
        }
    }

    pub fn label_offset(&self) -> u32 {
        match self {
            Self::Known(section) => section.label_offset(),
            Self::Unmapped(_) => FALLBACK_LABEL_OFFSET,
        }
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
