//! # API Facade
//!
//! [`DeckApi`] is the application state: it owns the store and every component,
//! and it is the single entry point any UI uses. All mutation goes through its
//! methods; nothing else holds on to shared state.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Loads** every slot on [`DeckApi::open`], recovering from corrupt ones
//! - **Gates** operations on the session (card edits are ADMIN only, favorites
//!   need a logged-in user)
//! - **Dispatches** to the component that owns the data
//! - **Notifies**: each mutating call leaves a message on the [`Notifier`]
//!
//! Business rules live in the components (`directory`, `session`, `catalog`,
//! `favorites`, `categories`); they are tested there. Tests here cover gating,
//! notices and wiring.
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `DeckApi<FileStore>`
//! - Testing: `DeckApi<InMemoryStore>`

use crate::catalog::CardCatalog;
use crate::categories::{self, CategoryCounts, CategoryView};
use crate::config::DeckConfig;
use crate::directory::UserDirectory;
use crate::error::{DeckError, Result};
use crate::favorites::FavoritesSet;
use crate::model::{Card, CardDraft, SessionView};
use crate::notify::{NoticeId, NoticeLevel, Notifier};
use crate::session::SessionManager;
use crate::store::KeyValueStore;
use crate::theme::Theme;
use chrono::Utc;

pub struct DeckApi<S: KeyValueStore> {
    store: S,
    directory: UserDirectory,
    session: SessionManager,
    catalog: CardCatalog,
    favorites: FavoritesSet,
    theme: Theme,
    notices: Notifier,
    load_issues: Vec<DeckError>,
}

impl<S: KeyValueStore> DeckApi<S> {
    /// Load all state from `store` and restore the previous session.
    ///
    /// Corrupt slots do not fail the open: defaults are used and the problems are
    /// available from [`DeckApi::load_issues`] and shown as a warning notice.
    pub fn open(mut store: S, config: &DeckConfig) -> Result<Self> {
        let mut load_issues = Vec::new();

        let directory = UserDirectory::load(&mut store)?;
        load_issues.extend(directory.issue);
        let catalog = CardCatalog::load(&mut store)?;
        load_issues.extend(catalog.issue);
        let favorites = FavoritesSet::load(&store)?;
        load_issues.extend(favorites.issue);
        let session = SessionManager::restore(&store)?;
        load_issues.extend(session.issue);
        let theme = Theme::load(&store, config.default_theme)?;
        load_issues.extend(theme.issue);

        let mut api = Self {
            store,
            directory: directory.value,
            session: session.value,
            catalog: catalog.value,
            favorites: favorites.value,
            theme: theme.value,
            notices: Notifier::new(config.notice_delay()),
            load_issues,
        };

        if !api.load_issues.is_empty() {
            let slots: Vec<String> = api
                .load_issues
                .iter()
                .filter_map(DeckError::corrupt_slot)
                .map(|key| key.to_string())
                .collect();
            api.notify(
                NoticeLevel::Warning,
                format!("Unreadable stored data, using defaults for: {}", slots.join(", ")),
            );
        }

        Ok(api)
    }

    // --- Session ---

    pub fn session(&self) -> Option<&SessionView> {
        self.session.current()
    }

    pub fn login(&mut self, id: &str, password: &str) -> Result<SessionView> {
        let result = self
            .session
            .login(&mut self.store, &self.directory, id, password);
        self.report(result)
    }

    /// Unverified provider login. See [`SessionManager::login_with_assertion`].
    pub fn login_with_assertion(&mut self, provider: &str) -> Result<SessionView> {
        let result = self.session.login_with_assertion(&mut self.store, provider);
        self.report(result)
    }

    pub fn sign_up(&mut self, id: &str, email: &str, password: &str) -> Result<SessionView> {
        let result =
            self.session
                .sign_up(&mut self.store, &mut self.directory, id, email, password);
        self.report(result)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout(&mut self.store)
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    // --- Cards ---

    pub fn cards(&self) -> &[Card] {
        self.catalog.all()
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.catalog.get(id)
    }

    pub fn create_card(&mut self, draft: CardDraft) -> Result<Card> {
        self.require_admin()?;
        let card = self.catalog.create(&mut self.store, draft)?;
        self.notify(NoticeLevel::Success, "Card added.");
        Ok(card)
    }

    /// Replace a card. Returns `false` (and changes nothing) for an unknown id.
    pub fn update_card(&mut self, card: Card) -> Result<bool> {
        self.require_admin()?;
        let id = card.id.clone();
        let updated = self.catalog.update(&mut self.store, card)?;
        if updated {
            self.notify(NoticeLevel::Success, "Card updated.");
        } else {
            self.notify(NoticeLevel::Warning, format!("No card with id {}; nothing changed.", id));
        }
        Ok(updated)
    }

    /// Delete a card. Returns `false` for an unknown id. Favorites pointing at
    /// the card are left alone.
    pub fn delete_card(&mut self, id: &str) -> Result<bool> {
        self.require_admin()?;
        let deleted = self.catalog.delete(&mut self.store, id)?;
        if deleted {
            self.notify(NoticeLevel::Removed, "Card deleted.");
        } else {
            self.notify(NoticeLevel::Warning, format!("No card with id {}; nothing changed.", id));
        }
        Ok(deleted)
    }

    // --- Favorites ---

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    /// Flip a card's favorite flag. Returns the new state.
    pub fn toggle_favorite(&mut self, card_id: &str) -> Result<bool> {
        self.require_session()?;
        self.favorites.toggle(&mut self.store, card_id)
    }

    // --- Categories ---

    pub fn category_counts(&self) -> CategoryCounts {
        categories::counts_by_category(&self.catalog, &self.favorites)
    }

    pub fn cards_for_view(&self, selected: Option<&CategoryView>) -> Vec<&Card> {
        categories::cards_for_view(&self.catalog, &self.favorites, selected)
    }

    // --- Theme ---

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.theme.save(&mut self.store)?;
        Ok(self.theme)
    }

    // --- Notifications & diagnostics ---

    pub fn notices(&self) -> &Notifier {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notifier {
        &mut self.notices
    }

    pub fn load_issues(&self) -> &[DeckError] {
        &self.load_issues
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) -> NoticeId {
        self.notices.show(level, text, Utc::now())
    }

    /// Surface a user-facing failure as an error notice, then pass it on.
    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            let text = e.to_string();
            self.notify(NoticeLevel::Error, text);
        }
        result
    }

    fn require_session(&mut self) -> Result<&SessionView> {
        if !self.session.is_authenticated() {
            return self.report(Err(DeckError::NotAuthenticated));
        }
        self.session.current().ok_or(DeckError::NotAuthenticated)
    }

    fn require_admin(&mut self) -> Result<()> {
        if self.require_session()?.is_admin() {
            return Ok(());
        }
        self.report(Err(DeckError::NotAuthorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthKind, Role};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::store::StoreKey;

    fn open(store: InMemoryStore) -> DeckApi<InMemoryStore> {
        DeckApi::open(store, &DeckConfig::default()).unwrap()
    }

    fn admin_api() -> DeckApi<InMemoryStore> {
        let mut api = open(InMemoryStore::new());
        api.login("admin", "admin123").unwrap();
        api
    }

    fn notice_text(api: &DeckApi<InMemoryStore>) -> Option<String> {
        api.notices().current().map(|n| n.text.clone())
    }

    #[test]
    fn fresh_store_opens_with_seed_data_and_no_session() {
        let api = open(InMemoryStore::new());
        assert!(api.session().is_none());
        assert_eq!(api.cards().len(), 10);
        assert_eq!(api.directory().len(), 2);
        assert!(api.favorites().is_empty());
        assert_eq!(api.theme(), Theme::Light);
        assert!(api.load_issues().is_empty());
        assert!(api.notices().current().is_none());
    }

    #[test]
    fn restores_persisted_session_on_open() {
        let store = StoreFixture::new().with_session("admin", Role::Admin).store;
        let api = open(store);
        assert_eq!(api.session().map(|s| s.role), Some(Role::Admin));
    }

    #[test]
    fn corrupt_slots_are_reported_and_defaulted() {
        let store = StoreFixture::new()
            .with_raw(StoreKey::Catalog, "[{")
            .with_raw(StoreKey::Favorites, "nope")
            .store;
        let api = open(store);

        assert_eq!(api.load_issues().len(), 2);
        assert_eq!(api.cards().len(), 10);
        assert!(api.favorites().is_empty());

        let notice = api.notices().current().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.text.contains("catalog"));
        assert!(notice.text.contains("favorites"));
    }

    #[test]
    fn unknown_theme_is_reported_with_other_slots() {
        let store = StoreFixture::new()
            .with_raw(StoreKey::Theme, "sepia")
            .with_raw(StoreKey::Favorites, "nope")
            .store;
        let api = open(store);

        assert_eq!(api.theme(), Theme::Light);
        assert_eq!(api.load_issues().len(), 2);
        let slots: Vec<_> = api
            .load_issues()
            .iter()
            .filter_map(DeckError::corrupt_slot)
            .collect();
        assert_eq!(slots, vec![StoreKey::Favorites, StoreKey::Theme]);
        assert!(notice_text(&api).unwrap().ends_with("favorites, theme"));
    }

    #[test]
    fn failed_login_leaves_error_notice() {
        let mut api = open(InMemoryStore::new());
        assert!(matches!(
            api.login("admin", "wrong"),
            Err(DeckError::InvalidCredentials)
        ));
        assert_eq!(api.notices().current().map(|n| n.level), Some(NoticeLevel::Error));
        assert!(api.session().is_none());
    }

    #[test]
    fn sign_up_collision_is_reported() {
        let mut api = open(InMemoryStore::new());
        let err = api.sign_up("user", "new@mail.test", "pw").unwrap_err();
        assert!(matches!(err, DeckError::UsernameTaken(_)));
        assert_eq!(api.directory().len(), 2);
    }

    #[test]
    fn social_login_is_marked_as_assertion() {
        let mut api = open(InMemoryStore::new());
        let view = api.login_with_assertion("facebook").unwrap();
        assert_eq!(view.id, "facebookUser");
        assert_eq!(view.auth, AuthKind::Assertion);
    }

    #[test]
    fn admin_can_manage_cards_with_notices() {
        let mut api = admin_api();

        let card = api.create_card(CardDraft::new("Edebiyat", "Nutuk kimin eseridir?")).unwrap();
        assert_eq!(api.cards()[0], card);
        assert_eq!(notice_text(&api).as_deref(), Some("Card added."));

        let mut edited = card.clone();
        edited.text = "Çalıkuşu kimin eseridir?".to_string();
        assert!(api.update_card(edited).unwrap());
        assert_eq!(notice_text(&api).as_deref(), Some("Card updated."));

        assert!(api.delete_card(&card.id).unwrap());
        assert_eq!(notice_text(&api).as_deref(), Some("Card deleted."));
        assert_eq!(api.notices().current().map(|n| n.level), Some(NoticeLevel::Removed));
        assert!(api.card(&card.id).is_none());
    }

    #[test]
    fn unknown_card_edits_are_warnings_not_errors() {
        let mut api = admin_api();
        let before = api.cards().to_vec();

        let ghost = Card::from_draft("ghost".into(), CardDraft::new("Tarih", "?"));
        assert!(!api.update_card(ghost).unwrap());
        assert!(!api.delete_card("ghost").unwrap());

        assert_eq!(api.cards(), before.as_slice());
        assert_eq!(api.notices().current().map(|n| n.level), Some(NoticeLevel::Warning));
    }

    #[test]
    fn regular_users_cannot_change_cards() {
        let mut api = open(InMemoryStore::new());
        api.login("user", "user123").unwrap();

        let err = api.create_card(CardDraft::new("Spor", "?")).unwrap_err();
        assert!(matches!(err, DeckError::NotAuthorized));
        assert!(matches!(api.delete_card("1"), Err(DeckError::NotAuthorized)));
        assert_eq!(api.cards().len(), 10);
    }

    #[test]
    fn logged_in_users_pass_the_session_gate_but_not_the_admin_gate() {
        let mut api = open(InMemoryStore::new());
        api.login("user", "user123").unwrap();

        assert!(api.toggle_favorite("1").unwrap());
        assert!(matches!(
            api.update_card(Card::from_draft("1".into(), CardDraft::new("Tarih", "?"))),
            Err(DeckError::NotAuthorized)
        ));
        assert_eq!(
            notice_text(&api).as_deref(),
            Some("Only administrators can change cards")
        );
    }

    #[test]
    fn anonymous_users_cannot_favorite_or_edit() {
        let mut api = open(InMemoryStore::new());
        assert!(matches!(api.toggle_favorite("1"), Err(DeckError::NotAuthenticated)));
        assert!(matches!(
            api.create_card(CardDraft::new("Spor", "?")),
            Err(DeckError::NotAuthenticated)
        ));
    }

    #[test]
    fn favorites_feed_the_virtual_category() {
        let mut api = open(InMemoryStore::new());
        api.login("user", "user123").unwrap();

        let history = api.cards_for_view(Some(&CategoryView::from_label("Tarih")));
        assert_eq!(history.len(), 2);
        let chosen = history[0].id.clone();

        assert!(api.toggle_favorite(&chosen).unwrap());
        let favorites = api.cards_for_view(Some(&CategoryView::Favorites));
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, chosen);
        assert_eq!(api.category_counts().get(&CategoryView::Favorites), Some(1));
    }

    #[test]
    fn deleting_a_favorite_card_leaves_dangling_id() {
        let mut api = admin_api();
        api.toggle_favorite("4").unwrap();
        api.delete_card("4").unwrap();

        assert!(api.favorites().contains("4"));
        assert!(api.cards_for_view(Some(&CategoryView::Favorites)).is_empty());
        assert_eq!(api.category_counts().get(&CategoryView::Favorites), Some(1));
    }

    #[test]
    fn state_survives_reopen() {
        let mut api = admin_api();
        let card = api.create_card(CardDraft::new("Sanat", "Mona Lisa?")).unwrap();
        api.toggle_favorite(&card.id).unwrap();
        api.toggle_theme().unwrap();

        let reopened = open(api.into_store());
        assert_eq!(reopened.cards()[0], card);
        assert!(reopened.favorites().contains(&card.id));
        assert_eq!(reopened.theme(), Theme::Dark);
        assert_eq!(reopened.session().map(|s| s.id.as_str()), Some("admin"));
    }

    #[test]
    fn logout_ends_session_for_next_open() {
        let mut api = admin_api();
        api.logout().unwrap();
        assert!(api.session().is_none());

        let reopened = open(api.into_store());
        assert!(reopened.session().is_none());
    }

    #[test]
    fn configured_notice_delay_is_used() {
        let config = DeckConfig {
            notice_delay_secs: 7,
            ..Default::default()
        };
        let api = DeckApi::open(InMemoryStore::new(), &config).unwrap();
        assert_eq!(api.notices().delay(), chrono::Duration::seconds(7));
    }
}
