//! Entity directory: display names and homepages for ids used in datasets.
//!
//! ```text
//! EntitySource ──query once──► EntityDirectoryProvider ──► EntityDirectory
//!                                        │
//!                                        └─ publish ─► EntitiesContext ─► use_entities()
//! ```

mod directory;
mod error;
mod provider;
mod source;

#[cfg(test)]
pub use directory::Entity;
pub use directory::EntityDirectory;
pub use provider::{EntityDirectoryProvider, GLOBAL_ENTITIES, use_entities};
pub use source::JsonEntitySource;

/// One line per key: `key → name (homepage)`.
///
/// Without keys, every entity is listed by id.
pub fn describe(directory: &EntityDirectory, keys: &[String]) -> Vec<String> {
    let line = |key: &str| {
        let name = directory.resolve_name(key);
        match directory.resolve_homepage(key) {
            Some(url) => format!("{key} → {name} ({url})"),
            None => format!("{key} → {name}"),
        }
    };
    if keys.is_empty() {
        directory.iter().map(|entity| line(&entity.id)).collect()
    } else {
        keys.iter().map(|key| line(key)).collect()
    }
}
