//! Comments service: moderation queues, pre-flight validation and spam
//! heuristics.
//!
//! Validation runs before any I/O and resolves to a failed `ApiResponse`
//! like every other outcome, so callers handle a single result shape.

use std::sync::Arc;

use chrono::{Duration, Utc};

use ellaia_shared::ApiResponse;

use crate::domain::{
    self, Comment, CommentCounts, CommentFilters, CommentStatus, CreateComment, UpdateComment,
};
use crate::error::DomainError;
use crate::repository::{Entity, Repository};

use super::loading_key;

/// Spam threshold: more than this many comments inside the window.
const SPAM_COMMENT_LIMIT: usize = 3;

pub struct CommentsService {
    repo: Arc<Repository>,
}

impl CommentsService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> ApiResponse<Vec<Comment>> {
        self.repo.list_all().await
    }

    pub async fn by_id(&self, id: &str) -> ApiResponse<Comment> {
        self.repo.get_by_id(id).await
    }

    /// Conjunctive filters, newest first.
    pub async fn filtered(&self, filters: &CommentFilters) -> ApiResponse<Vec<Comment>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let mut comments: Vec<Comment> = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|comment| filters.matches(comment))
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ApiResponse::ok(comments)
    }

    pub async fn approved_for_post(&self, post_id: &str) -> ApiResponse<Vec<Comment>> {
        self.filtered(&CommentFilters {
            post_id: Some(post_id.to_string()),
            status: Some(CommentStatus::Approved),
            ..CommentFilters::default()
        })
        .await
    }

    pub async fn pending(&self) -> ApiResponse<Vec<Comment>> {
        self.by_status(CommentStatus::Pending).await
    }

    pub async fn approved(&self) -> ApiResponse<Vec<Comment>> {
        self.by_status(CommentStatus::Approved).await
    }

    pub async fn by_status(&self, status: CommentStatus) -> ApiResponse<Vec<Comment>> {
        self.filtered(&CommentFilters {
            status: Some(status),
            ..CommentFilters::default()
        })
        .await
    }

    pub async fn by_author_email(&self, author_email: &str) -> ApiResponse<Vec<Comment>> {
        self.filtered(&CommentFilters {
            author_email: Some(author_email.to_string()),
            ..CommentFilters::default()
        })
        .await
    }

    pub async fn counts_by_status(&self) -> CommentCounts {
        let response = self.all().await;
        let mut counts = CommentCounts::default();
        let Some(comments) = response.data else {
            return counts;
        };

        for comment in comments {
            match comment.status {
                CommentStatus::Pending => counts.pending += 1,
                CommentStatus::Approved => counts.approved += 1,
                CommentStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Create a comment. Inputs are validated and normalized before any
    /// repository call; new comments always start PENDING.
    pub async fn create(&self, input: CreateComment) -> ApiResponse<Comment> {
        if let Err(err) = validate_new_comment(&input) {
            return ApiResponse::fail(err.to_string());
        }

        let author_name = input.author_name.trim().to_string();
        let author_email = input.author_email.trim().to_lowercase();
        let body = input.body.trim().to_string();

        self.repo
            .create(|id| Comment {
                id,
                post_id: input.post_id,
                author_name,
                author_email,
                body,
                status: CommentStatus::Pending,
                created_at: domain::now_iso(),
            })
            .await
    }

    /// Merge-patch; a patched body is re-validated and inputs are
    /// normalized the same way as on create.
    pub async fn update(&self, id: &str, updates: UpdateComment) -> ApiResponse<Comment> {
        if let Some(body) = &updates.body {
            if body.trim().chars().count() < 3 {
                return ApiResponse::fail(
                    DomainError::Validation(
                        "Comment must be at least 3 characters long".to_string(),
                    )
                    .to_string(),
                );
            }
        }

        let patch = UpdateComment {
            author_name: updates.author_name.map(|v| v.trim().to_string()),
            author_email: updates.author_email.map(|v| v.trim().to_lowercase()),
            body: updates.body.map(|v| v.trim().to_string()),
            status: updates.status,
        };
        self.repo.update(id, patch).await
    }

    pub async fn approve(&self, id: &str) -> ApiResponse<Comment> {
        self.update(
            id,
            UpdateComment {
                status: Some(CommentStatus::Approved),
                ..UpdateComment::default()
            },
        )
        .await
    }

    pub async fn reject(&self, id: &str) -> ApiResponse<Comment> {
        self.update(
            id,
            UpdateComment {
                status: Some(CommentStatus::Rejected),
                ..UpdateComment::default()
            },
        )
        .await
    }

    /// Moderate a batch: one update per id, outcomes aggregated. Succeeds
    /// only when every id succeeded.
    pub async fn approve_many(&self, ids: &[String]) -> ApiResponse<Vec<Comment>> {
        self.set_status_many(ids, CommentStatus::Approved).await
    }

    pub async fn reject_many(&self, ids: &[String]) -> ApiResponse<Vec<Comment>> {
        self.set_status_many(ids, CommentStatus::Rejected).await
    }

    async fn set_status_many(
        &self,
        ids: &[String],
        status: CommentStatus,
    ) -> ApiResponse<Vec<Comment>> {
        let mut updated = Vec::with_capacity(ids.len());
        let mut failures = 0usize;

        for id in ids {
            let response = self
                .update(
                    id,
                    UpdateComment {
                        status: Some(status),
                        ..UpdateComment::default()
                    },
                )
                .await;
            if response.success {
                if let Some(comment) = response.data {
                    updated.push(comment);
                    continue;
                }
            }
            failures += 1;
        }

        let message = format!("Updated {} of {} comments", updated.len(), ids.len());
        if failures == 0 {
            ApiResponse::ok_with_message(updated, message)
        } else {
            ApiResponse::fail_with(updated, message)
        }
    }

    pub async fn delete(&self, id: &str) -> ApiResponse<bool> {
        self.repo.delete::<Comment>(id).await
    }

    /// Remove every comment attached to a post.
    pub async fn delete_for_post(&self, post_id: &str) -> ApiResponse<bool> {
        let response = self
            .filtered(&CommentFilters {
                post_id: Some(post_id.to_string()),
                ..CommentFilters::default()
            })
            .await;
        if !response.success {
            return response.cast();
        }

        let comments = response.data.unwrap_or_default();
        let total = comments.len();
        let mut removed = 0usize;
        for comment in &comments {
            if self.delete(&comment.id).await.success {
                removed += 1;
            }
        }

        let message = format!("Deleted {removed} comments for post {post_id}");
        if removed == total {
            ApiResponse::ok_with_message(true, message)
        } else {
            ApiResponse::fail_with(false, message)
        }
    }

    /// True when the email posted more than three comments inside the
    /// trailing window.
    pub async fn check_for_spam(&self, author_email: &str, window_minutes: i64) -> bool {
        let response = self.by_author_email(author_email).await;
        if !response.success {
            return false;
        }

        let cutoff = Utc::now() - Duration::minutes(window_minutes);
        let recent = response
            .data
            .unwrap_or_default()
            .iter()
            .filter(|comment| {
                domain::parse_iso(&comment.created_at)
                    .map(|created| created > cutoff)
                    .unwrap_or(false)
            })
            .count();

        recent > SPAM_COMMENT_LIMIT
    }

    pub fn is_loading(&self, operation: &str, id: Option<&str>) -> bool {
        self.repo
            .is_loading(&loading_key(operation, Comment::COLLECTION, id))
    }
}

fn validate_new_comment(input: &CreateComment) -> Result<(), DomainError> {
    if !is_valid_email(input.author_email.trim()) {
        return Err(DomainError::Validation("Invalid email format".to_string()));
    }
    if input.body.trim().chars().count() < 3 {
        return Err(DomainError::Validation(
            "Comment must be at least 3 characters long".to_string(),
        ));
    }
    if input.author_name.trim().chars().count() < 2 {
        return Err(DomainError::Validation(
            "Author name must be at least 2 characters long".to_string(),
        ));
    }
    Ok(())
}

/// Simple pattern check: one `@`, no whitespace, a dot with non-empty
/// sides in the domain.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{instant_repo_arc, repo_without_fixture};

    fn service() -> CommentsService {
        CommentsService::new(instant_repo_arc())
    }

    fn comment(post_id: &str, email: &str, body: &str) -> CreateComment {
        CreateComment {
            post_id: post_id.into(),
            author_name: "Maria".into(),
            author_email: email.into(),
            body: body.into(),
        }
    }

    #[test]
    fn email_pattern_accepts_and_rejects() {
        assert!(is_valid_email("maria@ellaia.pt"));
        assert!(is_valid_email("a.b@sub.dominio.pt"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a @b.c"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
    }

    #[tokio::test]
    async fn invalid_input_fails_before_touching_storage() {
        // Any repository call would fail loudly here with a fixture error,
        // so a validation message proves the short-circuit.
        let comments = CommentsService::new(Arc::new(repo_without_fixture()));

        let bad_email = comments
            .create(comment("p1", "not-an-email", "gostei muito"))
            .await;
        assert!(!bad_email.success);
        assert!(bad_email.message.unwrap().contains("Invalid email format"));

        let short_body = comments.create(comment("p1", "maria@ellaia.pt", "ab")).await;
        assert!(!short_body.success);
        assert!(short_body.message.unwrap().contains("at least 3 characters"));

        let short_name = comments
            .create(CreateComment {
                author_name: " m ".into(),
                ..comment("p1", "maria@ellaia.pt", "gostei muito")
            })
            .await;
        assert!(!short_name.success);
        assert!(short_name.message.unwrap().contains("at least 2 characters"));
    }

    #[tokio::test]
    async fn create_normalizes_and_starts_pending() {
        let comments = service();
        let created = comments
            .create(CreateComment {
                post_id: "p1".into(),
                author_name: "  Maria  ".into(),
                author_email: "  MARIA@Ellaia.PT ".into(),
                body: "  adorei o artigo  ".into(),
            })
            .await
            .data
            .unwrap();

        assert_eq!(created.status, CommentStatus::Pending);
        assert_eq!(created.author_name, "Maria");
        assert_eq!(created.author_email, "maria@ellaia.pt");
        assert_eq!(created.body, "adorei o artigo");
    }

    #[tokio::test]
    async fn moderation_and_filters() {
        let comments = service();
        let first = comments
            .create(comment("p1", "a@b.pt", "primeiro comentário"))
            .await
            .data
            .unwrap();
        let second = comments
            .create(comment("p1", "c@d.pt", "segundo comentário"))
            .await
            .data
            .unwrap();
        comments
            .create(comment("p2", "e@f.pt", "outro post"))
            .await;

        comments.approve(&first.id).await;
        comments.reject(&second.id).await;

        let approved = comments.approved_for_post("p1").await.data.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, first.id);

        let pending = comments.pending().await.data.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].post_id, "p2");

        let counts = comments.counts_by_status().await;
        assert_eq!(
            counts,
            CommentCounts {
                pending: 1,
                approved: 1,
                rejected: 1
            }
        );
    }

    #[tokio::test]
    async fn bulk_approve_aggregates_every_outcome() {
        let comments = service();
        let first = comments
            .create(comment("p1", "a@b.pt", "um comentário"))
            .await
            .data
            .unwrap();
        let second = comments
            .create(comment("p1", "c@d.pt", "mais um comentário"))
            .await
            .data
            .unwrap();

        let all_good = comments
            .approve_many(&[first.id.clone(), second.id.clone()])
            .await;
        assert!(all_good.success);
        assert_eq!(all_good.data.unwrap().len(), 2);

        let with_ghost = comments
            .reject_many(&[first.id.clone(), "ghost".to_string()])
            .await;
        assert!(!with_ghost.success);
        assert_eq!(with_ghost.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_for_post_removes_only_that_posts_comments() {
        let comments = service();
        comments.create(comment("p1", "a@b.pt", "no post um")).await;
        comments.create(comment("p1", "c@d.pt", "também no um")).await;
        comments.create(comment("p2", "e@f.pt", "no post dois")).await;

        let response = comments.delete_for_post("p1").await;
        assert!(response.success);

        let remaining = comments.all().await.data.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].post_id, "p2");
    }

    #[tokio::test]
    async fn spam_check_counts_recent_comments_only() {
        let comments = service();
        for body in ["um dois três", "quatro cinco", "seis sete", "oito nove"] {
            comments.create(comment("p1", "spam@ellaia.pt", body)).await;
        }
        assert!(comments.check_for_spam("spam@ellaia.pt", 60).await);
        assert!(!comments.check_for_spam("limpa@ellaia.pt", 60).await);
        // A zero-width window sees nothing recent.
        assert!(!comments.check_for_spam("spam@ellaia.pt", 0).await);
    }
}
