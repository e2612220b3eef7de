use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Patch};

/// Author role. The rank ordering (ADMIN first) drives team listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorRole {
    Reader,
    Author,
    Editor,
    Admin,
}

impl AuthorRole {
    /// Fixed hierarchy used for team ordering: ADMIN=1, EDITOR=2,
    /// AUTHOR=3, READER=4.
    pub fn rank(self) -> u8 {
        match self {
            Self::Admin => 1,
            Self::Editor => 2,
            Self::Author => 3,
            Self::Reader => 4,
        }
    }

    /// Roles shown on the team page; readers are excluded.
    pub fn is_team(self) -> bool {
        !matches!(self, Self::Reader)
    }
}

/// Named social-profile URLs, each optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
}

/// Author entity. Email is logically unique - checked through
/// `email_exists`, not enforced by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AuthorRole,
    pub bio: String,
    pub avatar: String,
    pub links: AuthorLinks,
    pub created_at: String,
}

impl Entity for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    pub name: String,
    pub email: String,
    pub role: AuthorRole,
    pub bio: String,
    pub avatar: String,
    pub links: AuthorLinks,
}

/// Partial update over an author; doubles as the merge-patch since the
/// author record carries no derived fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<AuthorRole>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub links: Option<AuthorLinks>,
}

impl Patch<Author> for UpdateAuthor {
    fn apply(self, author: &mut Author) {
        if let Some(v) = self.name {
            author.name = v;
        }
        if let Some(v) = self.email {
            author.email = v;
        }
        if let Some(v) = self.role {
            author.role = v;
        }
        if let Some(v) = self.bio {
            author.bio = v;
        }
        if let Some(v) = self.avatar {
            author.avatar = v;
        }
        if let Some(v) = self.links {
            author.links = v;
        }
    }
}

/// Author tally per role; every role is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub reader: usize,
    pub author: usize,
    pub editor: usize,
    pub admin: usize,
}
