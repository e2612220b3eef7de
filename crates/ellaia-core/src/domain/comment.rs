use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Patch};

/// Moderation state of a comment. New comments always start PENDING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

/// Comment entity, attached to a post by foreign key. Deleting a post
/// does not cascade here; orphans are possible by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_name: String,
    pub author_email: String,
    pub body: String,
    pub status: CommentStatus,
    pub created_at: String,
}

impl Entity for Comment {
    const COLLECTION: &'static str = "comments";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub post_id: String,
    pub author_name: String,
    pub author_email: String,
    pub body: String,
}

/// Partial update over a comment; also the merge-patch. The service trims
/// and lowercases the inputs before this is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComment {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub body: Option<String>,
    pub status: Option<CommentStatus>,
}

impl Patch<Comment> for UpdateComment {
    fn apply(self, comment: &mut Comment) {
        if let Some(v) = self.author_name {
            comment.author_name = v;
        }
        if let Some(v) = self.author_email {
            comment.author_email = v;
        }
        if let Some(v) = self.body {
            comment.body = v;
        }
        if let Some(v) = self.status {
            comment.status = v;
        }
    }
}

/// Conjunctive comment filters.
#[derive(Debug, Clone, Default)]
pub struct CommentFilters {
    pub post_id: Option<String>,
    pub status: Option<CommentStatus>,
    pub author_email: Option<String>,
}

impl CommentFilters {
    pub fn matches(&self, comment: &Comment) -> bool {
        if let Some(post_id) = &self.post_id {
            if &comment.post_id != post_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if comment.status != status {
                return false;
            }
        }
        if let Some(author_email) = &self.author_email {
            if &comment.author_email != author_email {
                return false;
            }
        }
        true
    }
}

/// Comment tally per status; every status is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}
