use crate::error::{DeckError, IdentityField, Result};
use crate::model::UserRecord;
use crate::seed;
use crate::store::{self, KeyValueStore, Loaded, StoreKey};

/// Every known user, in sign-up order. Users are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn from_records(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// Load from the `directory` slot, seeding (and persisting) the two default
    /// accounts the first time.
    pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Loaded<Self>> {
        let (loaded, seeded) =
            store::load_or_default(&*store, StoreKey::Directory, seed::default_users)?;
        if seeded {
            tracing::info!("seeding user directory with default accounts");
            store::write_json(store, StoreKey::Directory, &loaded.value)?;
        }
        Ok(loaded.map(Self::from_records))
    }

    /// Exact match on id and password.
    pub fn find_by_credentials(&self, id: &str, password: &str) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|u| u.id == id && u.password == password)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    pub fn exists_by_email(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email == email)
    }

    /// Check-and-insert. The id is checked before the email; on a collision the
    /// directory is left as it was.
    pub fn append<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        record: UserRecord,
    ) -> Result<()> {
        if self.exists(&record.id) {
            return Err(DeckError::DuplicateIdentity {
                field: IdentityField::Id,
                value: record.id,
            });
        }
        if self.exists_by_email(&record.email) {
            return Err(DeckError::DuplicateIdentity {
                field: IdentityField::Email,
                value: record.email,
            });
        }

        self.users.push(record);
        store::write_json(store, StoreKey::Directory, &self.users)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.iter()
    }
}
