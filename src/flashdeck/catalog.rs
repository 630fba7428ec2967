use crate::error::Result;
use crate::model::{Card, CardDraft};
use crate::seed;
use crate::store::{self, KeyValueStore, Loaded, StoreKey};
use uuid::Uuid;

/// The ordered card collection. Newest cards come first.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
}

impl CardCatalog {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Load from the `catalog` slot, seeding (and persisting) the default deck
    /// the first time.
    pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Loaded<Self>> {
        let (loaded, seeded) =
            store::load_or_default(&*store, StoreKey::Catalog, seed::default_cards)?;
        if seeded {
            tracing::info!(cards = loaded.value.len(), "seeding card catalog");
            store::write_json(store, StoreKey::Catalog, &loaded.value)?;
        }
        Ok(loaded.map(Self::from_cards))
    }

    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Assign a fresh id, put the card at the front and persist.
    pub fn create<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        draft: CardDraft,
    ) -> Result<Card> {
        let card = Card::from_draft(self.fresh_id(), draft);
        self.cards.insert(0, card.clone());
        tracing::debug!(card = %card.id, category = %card.category, "card created");
        self.persist(store)?;
        Ok(card)
    }

    /// Replace the card with the same id.
    ///
    /// An unknown id is a no-op, not an error: nothing changes and nothing is
    /// written. Returns whether a card was replaced.
    pub fn update<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, card: Card) -> Result<bool> {
        let Some(slot) = self.cards.iter_mut().find(|c| c.id == card.id) else {
            tracing::debug!(card = %card.id, "update ignored, no such card");
            return Ok(false);
        };
        *slot = card;
        self.persist(store)?;
        Ok(true)
    }

    /// Remove the card with `id`. Idempotent; returns whether a card was removed.
    pub fn delete<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, id: &str) -> Result<bool> {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == before {
            return Ok(false);
        }
        tracing::debug!(card = %id, "card deleted");
        self.persist(store)?;
        Ok(true)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store::write_json(store, StoreKey::Catalog, &self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeckError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::collections::HashSet;

    fn seeded() -> (InMemoryStore, CardCatalog) {
        let mut store = InMemoryStore::new();
        let catalog = CardCatalog::load(&mut store).unwrap().value;
        (store, catalog)
    }

    #[test]
    fn seeds_default_deck_and_persists_it() {
        let (store, catalog) = seeded();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.all()[0].id, "1");
        assert!(store.get("catalog").unwrap().is_some());
    }

    #[test]
    fn create_puts_new_card_first_with_unique_id() {
        let (mut store, mut catalog) = seeded();
        let mut ids: HashSet<String> = catalog.all().iter().map(|c| c.id.clone()).collect();

        for i in 0..20 {
            let card = catalog
                .create(&mut store, CardDraft::new("Sanat", format!("Soru {}", i)))
                .unwrap();
            assert!(!card.id.is_empty());
            assert!(ids.insert(card.id.clone()), "id collided: {}", card.id);
            assert_eq!(catalog.all()[0], card);
        }
        assert_eq!(catalog.len(), 30);
    }

    #[test]
    fn update_replaces_card_in_place() {
        let (mut store, mut catalog) = seeded();
        let mut card = catalog.get("2").unwrap().clone();
        card.text = "Ağrı Dağı".to_string();
        card.image_url = Some("https://example.com/agri.png".to_string());

        assert!(catalog.update(&mut store, card.clone()).unwrap());
        assert_eq!(catalog.all()[1], card);

        let reloaded = CardCatalog::load(&mut store).unwrap().value;
        assert_eq!(reloaded.get("2"), Some(&card));
    }

    #[test]
    fn update_with_unknown_id_changes_nothing() {
        let (mut store, mut catalog) = seeded();
        let before_cards = catalog.all().to_vec();
        let before_raw = store.get("catalog").unwrap();
        let writes = store.write_count();

        let ghost = Card::from_draft("missing".into(), CardDraft::new("Tarih", "?"));
        assert!(!catalog.update(&mut store, ghost).unwrap());

        assert_eq!(catalog.all(), before_cards.as_slice());
        assert_eq!(store.get("catalog").unwrap(), before_raw);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn delete_is_idempotent() {
        let (mut store, mut catalog) = seeded();
        assert!(catalog.delete(&mut store, "5").unwrap());
        assert!(!catalog.delete(&mut store, "5").unwrap());
        assert!(catalog.get("5").is_none());
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn empty_stored_catalog_is_not_reseeded() {
        let mut store = StoreFixture::new().with_empty_catalog().store;
        let catalog = CardCatalog::load(&mut store).unwrap().value;
        assert!(catalog.is_empty());
    }

    #[test]
    fn failed_write_is_reported_but_mutation_kept() {
        let (mut store, mut catalog) = seeded();
        store.set_simulate_write_error(true);

        let result = catalog.create(&mut store, CardDraft::new("Sanat", "Mona Lisa?"));
        assert!(matches!(result, Err(DeckError::Store(_))));
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.all()[0].text, "Mona Lisa?");
    }
}
