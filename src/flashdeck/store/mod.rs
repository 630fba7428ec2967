//! # Storage Layer
//!
//! flashdeck persists everything through a tiny key-value contract, the
//! [`KeyValueStore`] trait: string keys, string values, get/set/remove. The store
//! owns durability only. What the values mean is decided by the components that
//! read and write them.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one file per key under a data directory.
//!   Writes go through a temp file and a rename.
//! - [`memory::InMemoryStore`]: map-backed storage for tests. No persistence.
//!
//! ## Slots
//!
//! Each mutable entity owns one slot, holding a complete snapshot:
//!
//! ```text
//! directory   JSON array of user records
//! session     JSON session view (absent when logged out)
//! catalog     JSON array of cards
//! favorites   JSON array of card ids
//! theme       raw "light" / "dark"
//! ```
//!
//! There is no transaction across slots. A slot that is missing means "use the
//! default". A slot that fails to parse is reported as
//! [`DeckError::CorruptPersistedState`] and the caller falls back to defaults.

use crate::error::{DeckError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;

/// The fixed set of slots flashdeck writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Directory,
    Session,
    Catalog,
    Favorites,
    Theme,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Directory => "directory",
            StoreKey::Session => "session",
            StoreKey::Catalog => "catalog",
            StoreKey::Favorites => "favorites",
            StoreKey::Theme => "theme",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface for durable key-value storage.
pub trait KeyValueStore {
    /// Read the raw value for `key`. `Ok(None)` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// A value loaded from a slot, plus the problem hit while loading it, if any.
///
/// `issue` is only ever `CorruptPersistedState`; the value is then the default.
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub issue: Option<DeckError>,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self { value, issue: None }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            value: f(self.value),
            issue: self.issue,
        }
    }
}

/// Read and parse a JSON slot.
pub fn read_json<S, T>(store: &S, key: StoreKey) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key.as_str())? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| DeckError::CorruptPersistedState { key, source })
}

/// Serialize `value` and write it to its slot.
///
/// Failures are logged here so that no write is ever lost silently, then
/// returned to the caller.
pub fn write_json<S, T>(store: &mut S, key: StoreKey, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    write_raw(store, key, &raw)
}

/// Write an already-encoded value to its slot, logging failures.
pub fn write_raw<S>(store: &mut S, key: StoreKey, raw: &str) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    match store.set(key.as_str(), raw) {
        Ok(()) => {
            tracing::debug!(slot = %key, bytes = raw.len(), "persisted");
            Ok(())
        }
        Err(e) => {
            tracing::error!(slot = %key, error = %e, "failed to persist");
            Err(e)
        }
    }
}

/// Remove a slot, logging failures the same way [`write_json`] does.
pub fn clear_slot<S>(store: &mut S, key: StoreKey) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(key.as_str()).inspect_err(|e| {
        tracing::error!(slot = %key, error = %e, "failed to clear");
    })
}

/// Load a JSON slot with the standard read policy.
///
/// - missing: `default()` is used and `Ok` carries no issue; `seeded` tells the
///   caller it should persist the default
/// - corrupt: `default()` is used, the slot is left untouched and the error is
///   returned as the issue
pub fn load_or_default<S, T>(
    store: &S,
    key: StoreKey,
    default: impl FnOnce() -> T,
) -> Result<(Loaded<T>, bool)>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match read_json(store, key) {
        Ok(Some(value)) => Ok((Loaded::clean(value), false)),
        Ok(None) => Ok((Loaded::clean(default()), true)),
        Err(e @ DeckError::CorruptPersistedState { .. }) => {
            tracing::warn!(slot = %key, error = %e, "falling back to defaults");
            Ok((
                Loaded {
                    value: default(),
                    issue: Some(e),
                },
                false,
            ))
        }
        Err(e) => Err(e),
    }
}
