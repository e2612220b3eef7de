//! Domain model: the six entities, their typed create/update inputs, and
//! the derivations shared between services (slugs, reading time,
//! timestamps).
//!
//! Records are persisted with camelCase keys so the serialized form
//! matches the bundled fixture assets exactly.

mod author;
mod category;
mod comment;
mod contact;
mod post;
pub mod slug;
mod tag;

pub use author::{Author, AuthorLinks, AuthorRole, CreateAuthor, RoleCounts, UpdateAuthor};
pub use category::{Category, CategoryPatch, CreateCategory, UpdateCategory};
pub use comment::{Comment, CommentCounts, CommentFilters, CommentStatus, CreateComment, UpdateComment};
pub use contact::{ContactForm, ContactSubmission, SubmissionStatus, UpdateSubmission};
pub use post::{CreatePost, Post, PostFilters, PostPatch, PostStatus, UpdatePost};
pub use tag::{CreateTag, Tag, TagPatch};

use chrono::{DateTime, SecondsFormat, Utc};

/// Current instant as an RFC 3339 string, the timestamp form every record
/// stores. Microsecond precision keeps successive writes distinguishable.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp. Empty or malformed values (a never-published
/// post carries an empty `publishedAt`) yield `None`.
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
