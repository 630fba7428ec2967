use crate::error::{DeckError, Result};
use crate::store::{self, KeyValueStore, Loaded, StoreKey};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// UI colour scheme preference. Stored as the bare word, not as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored preference, or `fallback` when unset. An unrecognised value also
    /// gives `fallback` and is reported as the issue; the slot is left as is.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        fallback: Theme,
    ) -> Result<Loaded<Theme>> {
        let Some(raw) = store.get(StoreKey::Theme.as_str())? else {
            return Ok(Loaded::clean(fallback));
        };
        match Theme::from_str(&raw) {
            Ok(theme) => Ok(Loaded::clean(theme)),
            Err(_) => {
                tracing::warn!(value = %raw, "unknown stored theme, using {}", fallback);
                Ok(Loaded {
                    value: fallback,
                    issue: Some(DeckError::UnknownPersistedValue {
                        key: StoreKey::Theme,
                        value: raw,
                    }),
                })
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(self, store: &mut S) -> Result<()> {
        store::write_raw(store, StoreKey::Theme, self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn unset_theme_uses_fallback() {
        let store = InMemoryStore::new();
        let loaded = Theme::load(&store, Theme::Dark).unwrap();
        assert_eq!(loaded.value, Theme::Dark);
        assert!(loaded.issue.is_none());
    }

    #[test]
    fn saved_as_bare_word() {
        let mut store = InMemoryStore::new();
        Theme::Dark.save(&mut store).unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(Theme::load(&store, Theme::Light).unwrap().value, Theme::Dark);
    }

    #[test]
    fn unknown_value_uses_fallback_and_is_reported() {
        let store = StoreFixture::new().with_raw(StoreKey::Theme, "sepia").store;
        let loaded = Theme::load(&store, Theme::Light).unwrap();

        assert_eq!(loaded.value, Theme::Light);
        assert!(matches!(
            &loaded.issue,
            Some(DeckError::UnknownPersistedValue {
                key: StoreKey::Theme,
                value,
            }) if value == "sepia"
        ));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("sepia"));
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
