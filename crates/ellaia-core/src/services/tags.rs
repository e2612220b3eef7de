//! Tags service: slug-deduplicated creation, search and suggestion
//! ranking.

use std::sync::Arc;

use ellaia_shared::ApiResponse;

use crate::domain::{CreateTag, Tag, TagPatch, slug};
use crate::error::DomainError;
use crate::repository::{Entity, Repository};

use super::loading_key;

pub struct TagsService {
    repo: Arc<Repository>,
}

impl TagsService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> ApiResponse<Vec<Tag>> {
        self.repo.list_all().await
    }

    pub async fn by_id(&self, id: &str) -> ApiResponse<Tag> {
        self.repo.get_by_id(id).await
    }

    pub async fn by_slug(&self, slug: &str) -> ApiResponse<Tag> {
        let response = self.all().await;
        if !response.success {
            return response.cast();
        }

        match response
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|tag| tag.slug == slug)
        {
            Some(tag) => ApiResponse::ok(tag),
            None => ApiResponse::missing(format!("Tag with slug '{slug}' not found")),
        }
    }

    /// Case-insensitive substring search on the name.
    pub async fn search(&self, term: &str) -> ApiResponse<Vec<Tag>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let needle = term.to_lowercase();
        let tags = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|tag| tag.name.to_lowercase().contains(&needle))
            .collect();
        ApiResponse::ok(tags)
    }

    pub async fn sorted(&self) -> ApiResponse<Vec<Tag>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let mut tags = response.data.unwrap_or_default();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        ApiResponse::ok(tags)
    }

    /// Sorted prefix stand-in for usage-ranked tags; there is no
    /// post-tag usage index to count against.
    pub async fn most_used(&self, limit: usize) -> ApiResponse<Vec<Tag>> {
        let response = self.sorted().await;
        if !response.success {
            return response;
        }

        let mut tags = response.data.unwrap_or_default();
        tags.truncate(limit);
        ApiResponse::ok(tags)
    }

    /// Autocomplete ranking: exact case-insensitive matches first, then
    /// the remaining partial matches, truncated to `limit`.
    pub async fn suggestions(&self, partial: &str, limit: usize) -> ApiResponse<Vec<Tag>> {
        let response = self.search(partial).await;
        if !response.success {
            return response;
        }

        let needle = partial.to_lowercase();
        let (exact, rest): (Vec<Tag>, Vec<Tag>) = response
            .data
            .unwrap_or_default()
            .into_iter()
            .partition(|tag| tag.name.to_lowercase() == needle);

        let mut suggestions = exact;
        suggestions.extend(rest);
        suggestions.truncate(limit);
        ApiResponse::ok(suggestions)
    }

    /// Create a tag. The trimmed name must be at least two characters;
    /// validation fails before any repository call.
    pub async fn create(&self, input: CreateTag) -> ApiResponse<Tag> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return ApiResponse::fail(
                DomainError::Validation("Tag name is required".to_string()).to_string(),
            );
        }
        if name.chars().count() < 2 {
            return ApiResponse::fail(
                DomainError::Validation("Tag name must be at least 2 characters long".to_string())
                    .to_string(),
            );
        }

        self.repo
            .create(|id| Tag {
                id,
                slug: slug::slugify(&name),
                name,
            })
            .await
    }

    /// Slug-deduplicated create: an existing tag is returned unchanged.
    pub async fn create_if_not_exists(&self, name: &str) -> ApiResponse<Tag> {
        let derived = slug::slugify(name);
        let existing = self.by_slug(&derived).await;
        if existing.success && existing.data.is_some() {
            return existing;
        }

        self.create(CreateTag { name: name.to_string() }).await
    }

    /// Bulk create. Input names are deduplicated by derived slug
    /// (case/whitespace-insensitive), each created via
    /// `create_if_not_exists`. Successes are aggregated; invalid names
    /// are skipped and never fail the batch.
    pub async fn create_many(&self, names: &[String]) -> ApiResponse<Vec<Tag>> {
        let mut seen = std::collections::HashSet::new();
        let mut created = Vec::new();

        for name in names {
            let derived = slug::slugify(name);
            if derived.is_empty() || !seen.insert(derived) {
                continue;
            }
            let response = self.create_if_not_exists(name.trim()).await;
            if response.success {
                if let Some(tag) = response.data {
                    created.push(tag);
                }
            }
        }

        let message = format!("Created {} tags", created.len());
        ApiResponse::ok_with_message(created, message)
    }

    /// Merge-patch; a rename regenerates the slug in the same write.
    pub async fn update(&self, id: &str, name: Option<String>) -> ApiResponse<Tag> {
        let name = name.map(|v| v.trim().to_string());
        let patch = TagPatch {
            slug: name.as_deref().map(slug::slugify),
            name,
        };
        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> ApiResponse<bool> {
        self.repo.delete::<Tag>(id).await
    }

    /// Fan-out delete; succeeds only when every id was removed.
    pub async fn delete_many(&self, ids: &[String]) -> ApiResponse<bool> {
        let mut removed = 0usize;
        for id in ids {
            if self.delete(id).await.success {
                removed += 1;
            }
        }

        let message = format!("Deleted {} of {} tags", removed, ids.len());
        if removed == ids.len() {
            ApiResponse::ok_with_message(true, message)
        } else {
            ApiResponse::fail_with(false, message)
        }
    }

    pub async fn exists_by_slug(&self, slug: &str) -> bool {
        let response = self.by_slug(slug).await;
        response.success && response.data.is_some()
    }

    /// Name collision check via derived slug; `exclude_id` skips the tag
    /// being edited.
    pub async fn exists_by_name(&self, name: &str, exclude_id: Option<&str>) -> bool {
        let derived = slug::slugify(name);
        let response = self.all().await;
        if !response.success {
            return false;
        }

        response
            .data
            .unwrap_or_default()
            .iter()
            .any(|tag| tag.slug == derived && Some(tag.id.as_str()) != exclude_id)
    }

    /// Resolve free-form names to the existing tags whose slug matches.
    pub async fn resolve_names(&self, names: &[String]) -> ApiResponse<Vec<Tag>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let slugs: std::collections::HashSet<String> =
            names.iter().map(|name| slug::slugify(name)).collect();
        let tags = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|tag| slugs.contains(&tag.slug))
            .collect();
        ApiResponse::ok(tags)
    }

    pub fn is_loading(&self, operation: &str, id: Option<&str>) -> bool {
        self.repo
            .is_loading(&loading_key(operation, Tag::COLLECTION, id))
    }
}
