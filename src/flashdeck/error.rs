use crate::store::StoreKey;
use thiserror::Error;

/// Which unique field of a user record collided on append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Id,
    Email,
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityField::Id => write!(f, "id"),
            IdentityField::Email => write!(f, "email"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username is already taken: {0}")]
    UsernameTaken(String),

    #[error("Email address is already in use: {0}")]
    EmailTaken(String),

    #[error("A user with {field} '{value}' already exists")]
    DuplicateIdentity { field: IdentityField, value: String },

    #[error("Stored {key} data is corrupt: {source}")]
    CorruptPersistedState {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored {key} data is corrupt: unknown value {value:?}")]
    UnknownPersistedValue { key: StoreKey, value: String },

    #[error("You need to log in first")]
    NotAuthenticated,

    #[error("Only administrators can change cards")]
    NotAuthorized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl DeckError {
    /// The slot an unreadable-data error came from, if it is one.
    pub fn corrupt_slot(&self) -> Option<StoreKey> {
        match self {
            DeckError::CorruptPersistedState { key, .. }
            | DeckError::UnknownPersistedValue { key, .. } => Some(*key),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
