use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::User => write!(f, "USER"),
        }
    }
}

/// A user as stored in the directory. `id` is the login handle.
///
/// The password is kept and compared in plain text. That is the storage contract
/// of the data this crate reads; it is not a security mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl UserRecord {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

/// How a session came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    /// Checked against the user directory.
    #[default]
    Password,
    /// Fabricated from a provider name with no verification at all.
    Assertion,
}

/// The public part of an authenticated user. Carries no secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub auth: AuthKind,
}

impl SessionView {
    pub fn password(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            auth: AuthKind::Password,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&UserRecord> for SessionView {
    fn from(user: &UserRecord) -> Self {
        SessionView::password(user.id.clone(), user.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub category: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Card {
    pub fn from_draft(id: String, draft: CardDraft) -> Self {
        Self {
            id,
            category: draft.category,
            text: draft.text,
            image_url: draft.image_url,
            background_color: draft.background_color,
        }
    }
}

/// Card contents without an id; the catalog assigns ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub category: String,
    pub text: String,
    pub image_url: Option<String>,
    pub background_color: Option<String>,
}

impl CardDraft {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}
