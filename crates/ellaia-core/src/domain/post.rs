use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Patch};

/// Publication state of a post. Transitions are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

/// Post entity - a blog article.
///
/// `published_at` is an RFC 3339 string when the post has been published
/// and the empty string otherwise; `reading_time`, `views` and `likes`
/// are derived/counter fields stamped by the service, never by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub status: PostStatus,
    pub published_at: String,
    pub created_at: String,
    pub updated_at: String,
    pub author_id: String,
    pub category_id: String,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub views: u64,
    pub likes: u64,
}

impl Entity for Post {
    const COLLECTION: &'static str = "posts";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a post. Identity, slug, timestamps and counters are
/// stamped by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub author_id: String,
    pub category_id: String,
    pub tags: Vec<String>,
    /// Defaults to [`PostStatus::Draft`] when unspecified.
    pub status: Option<PostStatus>,
}

/// Caller-facing partial update. Unset fields retain their prior value.
/// The author of a post cannot be reassigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<String>,
}

/// Full merge-patch over a stored post, including the derived fields the
/// service recomputes (slug, reading time, `updated_at`) and the raw
/// counters. `id`, `author_id` and `created_at` are not patchable.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub reading_time: Option<u32>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
}

impl Patch<Post> for PostPatch {
    fn apply(self, post: &mut Post) {
        if let Some(v) = self.title {
            post.title = v;
        }
        if let Some(v) = self.slug {
            post.slug = v;
        }
        if let Some(v) = self.excerpt {
            post.excerpt = v;
        }
        if let Some(v) = self.content {
            post.content = v;
        }
        if let Some(v) = self.cover_image {
            post.cover_image = v;
        }
        if let Some(v) = self.category_id {
            post.category_id = v;
        }
        if let Some(v) = self.tags {
            post.tags = v;
        }
        if let Some(v) = self.status {
            post.status = v;
        }
        if let Some(v) = self.published_at {
            post.published_at = v;
        }
        if let Some(v) = self.updated_at {
            post.updated_at = v;
        }
        if let Some(v) = self.reading_time {
            post.reading_time = v;
        }
        if let Some(v) = self.views {
            post.views = v;
        }
        if let Some(v) = self.likes {
            post.likes = v;
        }
    }
}

/// Conjunctive filter set for post queries; every provided predicate must
/// hold. `tags` matches on any overlap, `search` is a case-insensitive
/// substring over title, excerpt and content.
#[derive(Debug, Clone, Default)]
pub struct PostFilters {
    pub category_id: Option<String>,
    pub author_id: Option<String>,
    pub status: Option<PostStatus>,
    pub tags: Option<Vec<String>>,
    pub search: Option<String>,
}

impl PostFilters {
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category_id) = &self.category_id {
            if &post.category_id != category_id {
                return false;
            }
        }
        if let Some(author_id) = &self.author_id {
            if &post.author_id != author_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if post.status != status {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !tags.is_empty() && !tags.iter().any(|tag| post.tags.contains(tag)) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let term = search.to_lowercase();
            let hit = post.title.to_lowercase().contains(&term)
                || post.excerpt.to_lowercase().contains(&term)
                || post.content.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        true
    }
}
