//! # Session state machine
//!
//! ```text
//!              login / sign_up / login_with_assertion
//!   Anonymous ─────────────────────────────────────────▶ Authenticated(view)
//!       ▲                                                      │
//!       └────────────────────────── logout ◀──────────────────┘
//! ```
//!
//! A [`SessionView`] exists exactly while the manager is authenticated, and the
//! `session` slot mirrors it: written on every entry transition, removed on
//! logout. Taking an entry transition while already authenticated replaces the
//! current view.

use crate::directory::UserDirectory;
use crate::error::{DeckError, IdentityField, Result};
use crate::model::{AuthKind, Role, SessionView, UserRecord};
use crate::store::{self, KeyValueStore, Loaded, StoreKey};

#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    current: Option<SessionView>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the persisted session, if any. Called once at startup.
    ///
    /// A corrupt slot restores as anonymous and is reported as the issue.
    pub fn restore<S: KeyValueStore + ?Sized>(store: &S) -> Result<Loaded<Self>> {
        let (loaded, _) =
            store::load_or_default(store, StoreKey::Session, || None::<SessionView>)?;
        if let Some(view) = &loaded.value {
            tracing::info!(user = %view.id, role = %view.role, "restored session");
        }
        Ok(loaded.map(|current| Self { current }))
    }

    pub fn current(&self) -> Option<&SessionView> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(SessionView::is_admin)
    }

    pub fn login<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        directory: &UserDirectory,
        id: &str,
        password: &str,
    ) -> Result<SessionView> {
        let Some(user) = directory.find_by_credentials(id, password) else {
            tracing::info!(user = %id, "login rejected");
            return Err(DeckError::InvalidCredentials);
        };
        self.enter(store, SessionView::from(user))
    }

    /// Stand-in for federated login: fabricates `"{provider}User"` with role
    /// USER. Nothing is verified and the directory is not consulted.
    pub fn login_with_assertion<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        provider: &str,
    ) -> Result<SessionView> {
        let view = SessionView {
            id: format!("{}User", provider),
            role: Role::User,
            auth: AuthKind::Assertion,
        };
        self.enter(store, view)
    }

    /// Register a USER account and log it in. Reports `UsernameTaken` before
    /// `EmailTaken` when both collide.
    pub fn sign_up<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        directory: &mut UserDirectory,
        id: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionView> {
        let record = UserRecord::new(id, email, password, Role::User);
        let view = SessionView::from(&record);

        directory
            .append(store, record)
            .map_err(|e| match e {
                DeckError::DuplicateIdentity {
                    field: IdentityField::Id,
                    value,
                } => DeckError::UsernameTaken(value),
                DeckError::DuplicateIdentity {
                    field: IdentityField::Email,
                    value,
                } => DeckError::EmailTaken(value),
                other => other,
            })?;

        tracing::info!(user = %id, "signed up");
        self.enter(store, view)
    }

    pub fn logout<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        if let Some(view) = self.current.take() {
            tracing::info!(user = %view.id, "logged out");
        }
        store::clear_slot(store, StoreKey::Session)
    }

    fn enter<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        view: SessionView,
    ) -> Result<SessionView> {
        if let Some(previous) = &self.current {
            tracing::debug!(previous = %previous.id, "replacing active session");
        }
        tracing::info!(user = %view.id, role = %view.role, auth = ?view.auth, "logged in");
        self.current = Some(view.clone());
        store::write_json(store, StoreKey::Session, &view)?;
        Ok(view)
    }
}
