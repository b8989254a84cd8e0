//! Publishing an entity directory to consumers.
//!
//! The composition root mounts an [`EntityDirectoryProvider`] once and hands
//! its directory to whatever needs it. Consumers that cannot be given the
//! directory directly read it from an [`EntitiesContext`] instead; the
//! provider publishes there on mount and restores the previous directory
//! when dropped.

use super::directory::{Entity, EntityDirectory};
use super::error::EntitiesError;
use super::source::EntitySource;
use crate::log;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::Arc;

/// Process-wide context, used by [`use_entities`].
pub static GLOBAL_ENTITIES: EntitiesContext = EntitiesContext::new();

/// Slot holding the directory of the innermost mounted provider.
pub struct EntitiesContext {
    slot: ArcSwapOption<EntityDirectory>,
}

impl EntitiesContext {
    pub const fn new() -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
        }
    }

    /// Directory of the mounted provider.
    pub fn lookup(&self) -> Result<Arc<EntityDirectory>, EntitiesError> {
        self.slot.load_full().ok_or(EntitiesError::NoProvider)
    }

    fn publish(&self, directory: Option<Arc<EntityDirectory>>) -> Option<Arc<EntityDirectory>> {
        self.slot.swap(directory)
    }
}

impl Default for EntitiesContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory from [`GLOBAL_ENTITIES`].
///
/// Without a mounted provider this panics in debug builds. Release builds
/// log a warning and return an empty directory, so names echo their keys
/// and homepages are absent.
pub fn use_entities() -> Arc<EntityDirectory> {
    match GLOBAL_ENTITIES.lookup() {
        Ok(directory) => directory,
        Err(err) => {
            if cfg!(debug_assertions) {
                panic!("{err}: mount an EntityDirectoryProvider before resolving entities");
            }
            log!("warn"; "{err}, entity names are shown as given");
            Arc::new(EntityDirectory::default())
        }
    }
}

struct Memo {
    entities: Arc<[Entity]>,
    directory: Arc<EntityDirectory>,
}

/// Owns the entity list of one mount and the directory built from it.
pub struct EntityDirectoryProvider<'c> {
    context: &'c EntitiesContext,
    memo: Mutex<Memo>,
    /// Directory published before this provider, restored on drop.
    previous: Option<Arc<EntityDirectory>>,
}

impl<'c> EntityDirectoryProvider<'c> {
    /// Query `source` once, build the directory and publish it on `context`.
    pub fn mount(
        source: &dyn EntitySource,
        context: &'c EntitiesContext,
    ) -> Result<Self, EntitiesError> {
        let entities: Arc<[Entity]> = source.query()?.into();
        let directory = Arc::new(EntityDirectory::new(entities.clone()));
        let previous = context.publish(Some(directory.clone()));
        if directory.is_empty() {
            log!("warn"; "entity list is empty, names are shown as given");
        } else {
            log!("entities"; "loaded {} entities", directory.len());
        }

        Ok(Self {
            context,
            memo: Mutex::new(Memo {
                entities,
                directory,
            }),
            previous,
        })
    }

    /// The current directory; the same `Arc` until the entity list changes.
    pub fn directory(&self) -> Arc<EntityDirectory> {
        self.memo.lock().directory.clone()
    }

    #[allow(dead_code)] // Reserved API
    pub fn entities(&self) -> Arc<[Entity]> {
        self.memo.lock().entities.clone()
    }

    /// Swap in a new entity list and republish.
    ///
    /// Passing the list already held is a no-op. Returns whether the
    /// directory was rebuilt.
    #[allow(dead_code)] // Reserved API
    pub fn replace_entities(&self, entities: Arc<[Entity]>) -> bool {
        let mut memo = self.memo.lock();
        if Arc::ptr_eq(&memo.entities, &entities) {
            return false;
        }
        let directory = Arc::new(EntityDirectory::new(entities.clone()));
        self.context.publish(Some(directory.clone()));
        *memo = Memo {
            entities,
            directory,
        };
        true
    }
}

impl Drop for EntityDirectoryProvider<'_> {
    fn drop(&mut self) {
        self.context.publish(self.previous.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::source::StaticEntitySource;
    use std::cell::Cell;

    fn chrome() -> Entity {
        Entity::new("chrome", "Chrome", Some("https://google.com/chrome"))
    }

    /// Counts how often it is queried.
    struct CountingSource {
        calls: Cell<usize>,
        entities: Vec<Entity>,
    }

    impl EntitySource for CountingSource {
        fn query(&self) -> Result<Vec<Entity>, EntitiesError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.entities.clone())
        }
    }

    struct FailingSource;

    impl EntitySource for FailingSource {
        fn query(&self) -> Result<Vec<Entity>, EntitiesError> {
            Err(EntitiesError::Io(
                "entities.json".into(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            ))
        }
    }

    #[test]
    fn test_lookup_outside_provider() {
        let context = EntitiesContext::new();
        assert!(matches!(context.lookup(), Err(EntitiesError::NoProvider)));
    }

    #[test]
    fn test_mount_queries_once_and_publishes() {
        let context = EntitiesContext::new();
        let source = CountingSource {
            calls: Cell::new(0),
            entities: vec![chrome()],
        };

        let provider = EntityDirectoryProvider::mount(&source, &context).unwrap();
        let first = provider.directory();
        let second = provider.directory();
        let looked_up = context.lookup().unwrap();

        assert_eq!(source.calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &looked_up));
        assert_eq!(looked_up.resolve_name("CHROME"), "Chrome");
    }

    #[test]
    fn test_drop_unpublishes() {
        let context = EntitiesContext::new();
        let source = StaticEntitySource(vec![chrome()]);

        let provider = EntityDirectoryProvider::mount(&source, &context).unwrap();
        assert!(context.lookup().is_ok());
        drop(provider);
        assert!(matches!(context.lookup(), Err(EntitiesError::NoProvider)));
    }

    #[test]
    fn test_nested_provider_restores_outer() {
        let context = EntitiesContext::new();
        let outer_source = StaticEntitySource(vec![chrome()]);
        let inner_source = StaticEntitySource(vec![Entity::new("chrome", "Chromium", None)]);

        let outer = EntityDirectoryProvider::mount(&outer_source, &context).unwrap();
        {
            let _inner = EntityDirectoryProvider::mount(&inner_source, &context).unwrap();
            assert_eq!(context.lookup().unwrap().resolve_name("chrome"), "Chromium");
        }
        assert_eq!(context.lookup().unwrap().resolve_name("chrome"), "Chrome");
        assert!(Arc::ptr_eq(&context.lookup().unwrap(), &outer.directory()));
    }

    #[test]
    fn test_replace_entities_memoizes_on_list() {
        let context = EntitiesContext::new();
        let provider =
            EntityDirectoryProvider::mount(&StaticEntitySource(vec![chrome()]), &context).unwrap();
        let before = provider.directory();

        assert!(!provider.replace_entities(provider.entities()));
        assert!(Arc::ptr_eq(&before, &provider.directory()));

        // Equal content, different list: rebuilt
        let copy: Arc<[Entity]> = vec![chrome()].into();
        assert!(provider.replace_entities(copy));
        let after = provider.directory();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &context.lookup().unwrap()));
    }

    #[test]
    fn test_mount_failure_publishes_nothing() {
        let context = EntitiesContext::new();
        assert!(EntityDirectoryProvider::mount(&FailingSource, &context).is_err());
        assert!(context.lookup().is_err());
    }

    // The only test touching `GLOBAL_ENTITIES`
    #[test]
    fn test_use_entities_global() {
        let outside = std::panic::catch_unwind(use_entities);
        if cfg!(debug_assertions) {
            assert!(outside.is_err());
        } else {
            assert!(outside.unwrap().is_empty());
        }

        let provider =
            EntityDirectoryProvider::mount(&StaticEntitySource(vec![chrome()]), &GLOBAL_ENTITIES)
                .unwrap();
        assert_eq!(use_entities().resolve_homepage("Chrome"), Some("https://google.com/chrome"));
        drop(provider);

        assert!(GLOBAL_ENTITIES.lookup().is_err());
    }
}
