use super::KeyValueStore;
use crate::error::{DeckError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: HashMap<String, String>,
    simulate_write_error: bool,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set`/`remove` fail, for exercising error reporting.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful `set`/`remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(DeckError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.slots.remove(key);
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Card, Role, SessionView, UserRecord};
    use crate::store::StoreKey;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Put a raw, unparsed value into a slot.
        pub fn with_raw(mut self, key: StoreKey, raw: &str) -> Self {
            self.store.set(key.as_str(), raw).unwrap();
            self
        }

        pub fn with_users(mut self, users: &[UserRecord]) -> Self {
            let raw = serde_json::to_string(users).unwrap();
            self.store.set(StoreKey::Directory.as_str(), &raw).unwrap();
            self
        }

        pub fn with_cards(mut self, cards: &[Card]) -> Self {
            let raw = serde_json::to_string(cards).unwrap();
            self.store.set(StoreKey::Catalog.as_str(), &raw).unwrap();
            self
        }

        /// An empty catalog, so tests are not dominated by the seed cards.
        pub fn with_empty_catalog(self) -> Self {
            self.with_cards(&[])
        }

        pub fn with_favorites(mut self, ids: &[&str]) -> Self {
            let raw = serde_json::to_string(ids).unwrap();
            self.store.set(StoreKey::Favorites.as_str(), &raw).unwrap();
            self
        }

        pub fn with_session(mut self, id: &str, role: Role) -> Self {
            let view = SessionView::password(id, role);
            let raw = serde_json::to_string(&view).unwrap();
            self.store.set(StoreKey::Session.as_str(), &raw).unwrap();
            self
        }
    }
}
