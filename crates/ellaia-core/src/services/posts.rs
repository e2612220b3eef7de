//! Posts service: filtering, featured selection, publication lifecycle
//! and engagement counters.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use ellaia_shared::ApiResponse;

use crate::domain::{self, CreatePost, Post, PostFilters, PostPatch, PostStatus, UpdatePost, slug};
use crate::repository::{Entity, Repository};

use super::loading_key;

pub struct PostsService {
    repo: Arc<Repository>,
}

impl PostsService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> ApiResponse<Vec<Post>> {
        self.repo.list_all().await
    }

    pub async fn by_id(&self, id: &str) -> ApiResponse<Post> {
        self.repo.get_by_id(id).await
    }

    pub async fn by_slug(&self, slug: &str) -> ApiResponse<Post> {
        let response = self.all().await;
        if !response.success {
            return response.cast();
        }

        match response
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|post| post.slug == slug)
        {
            Some(post) => ApiResponse::ok(post),
            None => ApiResponse::missing(format!("Post with slug '{slug}' not found")),
        }
    }

    /// All provided predicates apply conjunctively over the full set.
    pub async fn filtered(&self, filters: &PostFilters) -> ApiResponse<Vec<Post>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let posts = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|post| filters.matches(post))
            .collect();
        ApiResponse::ok(posts)
    }

    pub async fn published(&self) -> ApiResponse<Vec<Post>> {
        self.filtered(&PostFilters {
            status: Some(PostStatus::Published),
            ..PostFilters::default()
        })
        .await
    }

    /// Most recently published posts, most recent first.
    pub async fn featured(&self, limit: usize) -> ApiResponse<Vec<Post>> {
        let response = self.published().await;
        if !response.success {
            return response;
        }

        let mut posts = response.data.unwrap_or_default();
        posts.sort_by_key(|post| std::cmp::Reverse(published_instant(post)));
        posts.truncate(limit);
        ApiResponse::ok(posts)
    }

    /// Create a post: slug from the title, DRAFT unless stated otherwise,
    /// `published_at` only when born PUBLISHED, derived reading time,
    /// zeroed counters.
    pub async fn create(&self, input: CreatePost) -> ApiResponse<Post> {
        let status = input.status.unwrap_or(PostStatus::Draft);
        let now = domain::now_iso();
        let published_at = if status == PostStatus::Published {
            now.clone()
        } else {
            String::new()
        };

        self.repo
            .create(|id| Post {
                id,
                slug: slug::slugify(&input.title),
                reading_time: slug::reading_time(&input.content),
                title: input.title,
                excerpt: input.excerpt,
                content: input.content,
                cover_image: input.cover_image,
                status,
                published_at,
                created_at: now.clone(),
                updated_at: now,
                author_id: input.author_id,
                category_id: input.category_id,
                tags: input.tags,
                views: 0,
                likes: 0,
            })
            .await
    }

    /// Merge-patch a post. `updated_at` always moves; slug, reading time
    /// and `published_at` are recomputed when their source fields change.
    pub async fn update(&self, id: &str, updates: UpdatePost) -> ApiResponse<Post> {
        let slug = updates.title.as_deref().map(slug::slugify);
        let reading_time = updates.content.as_deref().map(slug::reading_time);
        let published_at = if updates.status == Some(PostStatus::Published) {
            Some(domain::now_iso())
        } else {
            updates.published_at
        };

        let patch = PostPatch {
            title: updates.title,
            slug,
            excerpt: updates.excerpt,
            content: updates.content,
            cover_image: updates.cover_image,
            category_id: updates.category_id,
            tags: updates.tags,
            status: updates.status,
            published_at,
            updated_at: Some(domain::now_iso()),
            reading_time,
            views: None,
            likes: None,
        };

        self.repo.update(id, patch).await
    }

    pub async fn publish(&self, id: &str) -> ApiResponse<Post> {
        self.update(
            id,
            UpdatePost {
                status: Some(PostStatus::Published),
                ..UpdatePost::default()
            },
        )
        .await
    }

    pub async fn unpublish(&self, id: &str) -> ApiResponse<Post> {
        self.update(
            id,
            UpdatePost {
                status: Some(PostStatus::Draft),
                ..UpdatePost::default()
            },
        )
        .await
    }

    /// Read-then-write counter bump; check-then-act and race-prone under
    /// concurrent callers, acceptable for a single consumer.
    pub async fn increment_views(&self, id: &str) -> ApiResponse<Post> {
        let current = self.by_id(id).await;
        let Some(post) = current.data else {
            return ApiResponse::fail(format!("Post with id {id} not found"));
        };

        let patch = PostPatch {
            views: Some(post.views + 1),
            ..PostPatch::default()
        };
        self.repo.update(id, patch).await
    }

    pub async fn increment_likes(&self, id: &str) -> ApiResponse<Post> {
        let current = self.by_id(id).await;
        let Some(post) = current.data else {
            return ApiResponse::fail(format!("Post with id {id} not found"));
        };

        let patch = PostPatch {
            likes: Some(post.likes + 1),
            ..PostPatch::default()
        };
        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> ApiResponse<bool> {
        self.repo.delete::<Post>(id).await
    }

    pub fn is_loading(&self, operation: &str, id: Option<&str>) -> bool {
        self.repo
            .is_loading(&loading_key(operation, Post::COLLECTION, id))
    }
}

fn published_instant(post: &Post) -> DateTime<Utc> {
    domain::parse_iso(&post.published_at).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
