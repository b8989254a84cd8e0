//! Where entity lists come from.

use super::directory::Entity;
use super::error::EntitiesError;
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Produces the entity list for a provider.
pub trait EntitySource {
    fn query(&self) -> Result<Vec<Entity>, EntitiesError>;
}

/// `{ "entities": [ { "id", "name", "homepage" } ] }`
#[derive(Debug, Deserialize)]
struct EntitiesResponse {
    entities: Vec<Entity>,
}

/// Reads the entity list from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonEntitySource {
    path: PathBuf,
}

impl JsonEntitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EntitySource for JsonEntitySource {
    fn query(&self) -> Result<Vec<Entity>, EntitiesError> {
        let content =
            fs::read(&self.path).map_err(|err| EntitiesError::Io(self.path.clone(), err))?;
        let response: EntitiesResponse = serde_json::from_slice(&content)
            .map_err(|err| EntitiesError::Json(self.path.clone(), err))?;
        Ok(response.entities)
    }
}

/// In-memory entity list.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticEntitySource(pub Vec<Entity>);

#[cfg(test)]
impl EntitySource for StaticEntitySource {
    fn query(&self) -> Result<Vec<Entity>, EntitiesError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entities.json");
        fs::write(
            &path,
            r#"{ "entities": [
                { "id": "chrome", "name": "Chrome", "homepage": "https://google.com/chrome" },
                { "id": "webkit", "name": "WebKit" }
            ] }"#,
        )
        .unwrap();

        let entities = JsonEntitySource::new(&path).query().unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new("chrome", "Chrome", Some("https://google.com/chrome")),
                Entity::new("webkit", "WebKit", None),
            ]
        );
    }

    #[test]
    fn test_json_source_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonEntitySource::new(dir.path().join("missing.json"));
        assert!(matches!(missing.query(), Err(EntitiesError::Io(..))));

        let path = dir.path().join("bad.json");
        fs::write(&path, r#"[{ "id": "chrome" }]"#).unwrap();
        let err = JsonEntitySource::new(&path).query().unwrap_err();
        assert!(matches!(err, EntitiesError::Json(..)));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_static_source() {
        let source = StaticEntitySource(vec![Entity::new("deno", "Deno", None)]);
        assert_eq!(source.query().unwrap().len(), 1);
        assert!(StaticEntitySource::default().query().unwrap().is_empty());
    }
}
