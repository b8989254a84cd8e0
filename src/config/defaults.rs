//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use super::super::OutputFormat;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn data() -> PathBuf {
        "data".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn entities() -> PathBuf {
        "entities.json".into()
    }

    pub fn format() -> OutputFormat {
        OutputFormat::default()
    }
}

// ============================================================================
// [chart] Section Defaults
// ============================================================================

pub mod chart {
    pub fn width() -> u32 {
        800
    }

    pub fn height() -> u32 {
        800
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    pub mod colors {
        use std::collections::BTreeMap;

        pub fn background_alt() -> String {
            "#2b2e4a".into()
        }

        pub fn link() -> String {
            "#f4a3b4".into()
        }

        /// One colour per known feature section.
        pub fn feature_sections() -> BTreeMap<String, String> {
            [
                ("layout", "#6ec6e5"),
                ("shapes_graphics", "#f27d89"),
                ("interactions", "#8f8fe8"),
                ("typography", "#f2c86b"),
                ("animations_transforms", "#7fd6a5"),
                ("media_queries", "#d98ce6"),
                ("other_features", "#e8a070"),
            ]
            .into_iter()
            .map(|(id, color)| (id.to_owned(), color.to_owned()))
            .collect()
        }
    }

    pub mod charts {
        pub fn font_family() -> String {
            "IBM Plex Mono, monospace".into()
        }

        pub fn label_color() -> String {
            "#ffffff".into()
        }

        pub fn tooltip_background() -> String {
            "#1b1d33".into()
        }

        pub fn tooltip_color() -> String {
            "#ffffff".into()
        }
    }
}
