//! Case-insensitive entity lookup.

use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A named thing the survey refers to, e.g. a browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: CompactString,
    #[serde(default)]
    pub name: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

#[cfg(test)]
impl Entity {
    pub fn new(id: &str, name: &str, homepage: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            homepage: homepage.map(str::to_owned),
        }
    }
}

/// Read-only view over an ordered entity list.
///
/// Keys match an entity's `id` or `name`, ignoring case. When several
/// entities match, the first in list order wins.
#[derive(Debug, Clone, Default)]
pub struct EntityDirectory {
    entities: Arc<[Entity]>,
    /// Lowercased `(id, name)` per entity, same order.
    keys: Vec<(CompactString, CompactString)>,
}

impl EntityDirectory {
    pub fn new(entities: impl Into<Arc<[Entity]>>) -> Self {
        let entities = entities.into();
        let keys = entities
            .iter()
            .map(|e| (lowercase(&e.id), lowercase(&e.name)))
            .collect();
        Self { entities, keys }
    }

    /// Entity whose id or name equals `key`, ignoring case.
    pub fn find(&self, key: &str) -> Option<&Entity> {
        let key = lowercase(key);
        self.keys
            .iter()
            .position(|(id, name)| *id == key || *name == key)
            .map(|index| &self.entities[index])
    }

    /// Display name for `key`, or `key` itself when nothing matches.
    pub fn resolve_name<'a>(&'a self, key: &'a str) -> &'a str {
        match self.find(key) {
            Some(entity) if !entity.name.is_empty() => entity.name.as_str(),
            _ => key,
        }
    }

    /// Homepage for `key`; empty homepages count as missing.
    pub fn resolve_homepage(&self, key: &str) -> Option<&str> {
        self.find(key)?
            .homepage
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}

fn lowercase(s: &str) -> CompactString {
    s.to_lowercase().to_compact_string()
}
