use crate::error::Result;
use crate::store::{self, KeyValueStore, Loaded, StoreKey};

/// Card ids marked as favorite, shared by everyone using this installation.
///
/// Ids are not checked against the catalog; a favorite may outlive its card.
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    ids: Vec<String>,
}

impl FavoritesSet {
    /// Build from stored ids, dropping repeats (first occurrence wins).
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut set = Self::default();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Loaded<Self>> {
        let (loaded, _) = store::load_or_default(store, StoreKey::Favorites, Vec::new)?;
        Ok(loaded.map(Self::from_ids))
    }

    /// Flip membership of `card_id` and persist. Returns the new membership.
    pub fn toggle<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, card_id: &str) -> Result<bool> {
        let now_favorite = match self.ids.iter().position(|id| id == card_id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(card_id.to_string());
                true
            }
        };
        store::write_json(store, StoreKey::Favorites, &self.ids)?;
        Ok(now_favorite)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.ids.iter().any(|id| id == card_id)
    }

    pub fn all(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
