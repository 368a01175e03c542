//! Locally persisted favorite recipes
//!
//! Favorites are stored under a single namespaced key as a JSON array of
//! recipe identifiers. Every mutation rewrites the whole array.
//!
//! Favorites are a convenience feature: unreadable or unavailable storage is
//! treated as an empty set, and failed writes leave the stored set untouched.

use crate::db::{DbError, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the favorites array
pub const FAVORITES_KEY: &str = "recipebox.favorites";

/// Ordered set of favorited recipe identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    ids: Vec<String>,
}

impl FavoritesSet {
    /// Build a set from a sequence, keeping the first occurrence of each id
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in insertion order
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Flip membership of `id`, returning whether it is now present
    ///
    /// Absent ids are appended; present ids are removed in place.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|fav| fav == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }
}

/// Favorites backed by a key-value store
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the persisted favorites
    ///
    /// Never fails: a missing key, undecodable bytes, or a storage error all
    /// yield an empty set.
    #[must_use]
    pub fn get_all(&self) -> FavoritesSet {
        match self.load() {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "favorites unreadable, treating as empty");
                FavoritesSet::default()
            }
        }
    }

    /// Whether `id` is currently a favorite
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get_all().contains(id)
    }

    /// Flip membership of `id` and persist the full resulting set
    ///
    /// Returns whether `id` is a favorite afterwards. If the write fails the
    /// stored set is unchanged, so the previous membership is returned.
    pub fn toggle(&self, id: &str) -> bool {
        let mut set = self.get_all();
        let was_favorite = set.contains(id);
        let now_favorite = set.toggle(id);

        match self.save(&set) {
            Ok(()) => {
                debug!(id, favorite = now_favorite, "toggled favorite");
                now_favorite
            }
            Err(e) => {
                warn!(id, error = %e, "could not persist favorites, toggle dropped");
                was_favorite
            }
        }
    }

    /// Remove every favorite
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the key cannot be deleted.
    pub fn clear(&self) -> Result<(), DbError> {
        self.store.remove(FAVORITES_KEY)?;
        Ok(())
    }

    fn load(&self) -> Result<FavoritesSet, DbError> {
        match self.store.get(FAVORITES_KEY)? {
            Some(bytes) => {
                let ids: Vec<String> = serde_json::from_slice(&bytes)?;
                Ok(FavoritesSet::from_ids(ids))
            }
            None => Ok(FavoritesSet::default()),
        }
    }

    fn save(&self, set: &FavoritesSet) -> Result<(), DbError> {
        let bytes = serde_json::to_vec(set.ids())?;
        self.store.set(FAVORITES_KEY, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, DbError> {
            Err(DbError::Unavailable("disk on fire".into()))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), DbError> {
            Err(DbError::Unavailable("disk on fire".into()))
        }

        fn remove(&self, _key: &str) -> Result<bool, DbError> {
            Err(DbError::Unavailable("disk on fire".into()))
        }
    }

    /// Store that reads fine but refuses writes
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DbError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), DbError> {
            Err(DbError::Unavailable("read-only".into()))
        }

        fn remove(&self, _key: &str) -> Result<bool, DbError> {
            Err(DbError::Unavailable("read-only".into()))
        }
    }

    fn memory_favorites() -> (Arc<MemoryStore>, FavoritesStore) {
        let store = Arc::new(MemoryStore::new());
        let favorites = FavoritesStore::new(store.clone());
        (store, favorites)
    }

    #[test]
    fn test_empty_when_key_absent() {
        let (_, favorites) = memory_favorites();
        assert!(favorites.get_all().is_empty());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (_, favorites) = memory_favorites();

        assert!(favorites.toggle("52771"));
        assert!(favorites.contains("52771"));

        assert!(!favorites.toggle("52771"));
        assert!(!favorites.contains("52771"));
    }

    #[test]
    fn test_double_toggle_restores_content_and_order() {
        let (store, favorites) = memory_favorites();
        favorites.toggle("a");
        favorites.toggle("b");
        favorites.toggle("c");
        let before = store.get(FAVORITES_KEY).unwrap();

        favorites.toggle("d");
        favorites.toggle("d");

        assert_eq!(favorites.get_all().ids(), ["a", "b", "c"]);
        assert_eq!(store.get(FAVORITES_KEY).unwrap(), before);
    }

    #[test]
    fn test_toggle_appends_at_end() {
        let (_, favorites) = memory_favorites();
        favorites.toggle("a");
        favorites.toggle("b");
        favorites.toggle("a");
        favorites.toggle("a");

        assert_eq!(favorites.get_all().ids(), ["b", "a"]);
    }

    #[test]
    fn test_persisted_as_json_array() {
        let (store, favorites) = memory_favorites();
        favorites.toggle("52771");
        favorites.toggle("52772");

        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(raw, br#"["52771","52772"]"#.to_vec());
    }

    #[test]
    fn test_unparsable_storage_fails_open() {
        let (store, favorites) = memory_favorites();
        store.set(FAVORITES_KEY, b"{not json").unwrap();

        assert!(favorites.get_all().is_empty());
        // a toggle replaces the garbage with a valid array
        assert!(favorites.toggle("1"));
        assert_eq!(favorites.get_all().ids(), ["1"]);
    }

    #[test]
    fn test_duplicates_collapsed_on_load() {
        let (store, favorites) = memory_favorites();
        store.set(FAVORITES_KEY, br#"["1","2","1"]"#).unwrap();

        assert_eq!(favorites.get_all().ids(), ["1", "2"]);
    }

    #[test]
    fn test_unavailable_storage_is_noop() {
        let favorites = FavoritesStore::new(Arc::new(BrokenStore));

        assert!(favorites.get_all().is_empty());
        assert!(!favorites.toggle("1"));
        assert!(!favorites.contains("1"));
    }

    #[test]
    fn test_failed_write_reports_previous_membership() {
        let inner = MemoryStore::new();
        inner.set(FAVORITES_KEY, br#"["keep"]"#).unwrap();
        let favorites = FavoritesStore::new(Arc::new(ReadOnlyStore(inner)));

        assert!(favorites.toggle("keep"));
        assert!(!favorites.toggle("new"));
        assert_eq!(favorites.get_all().ids(), ["keep"]);
    }

    #[test]
    fn test_clear() {
        let (_, favorites) = memory_favorites();
        favorites.toggle("x");
        favorites.clear().unwrap();
        assert!(favorites.get_all().is_empty());
    }

    #[test]
    fn test_set_from_ids_dedupes() {
        let set = FavoritesSet::from_ids(["a", "b", "a", "c", "b"]);
        assert_eq!(set.ids(), ["a", "b", "c"]);
        assert_eq!(set.len(), 3);
    }
}
