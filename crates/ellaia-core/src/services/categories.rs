//! Categories service.
//!
//! Deleting a category referenced by posts is allowed - the store keeps
//! no foreign keys and nothing cascades. Known limitation of the demo
//! scope.

use std::sync::Arc;

use ellaia_shared::ApiResponse;

use crate::domain::{Category, CategoryPatch, CreateCategory, UpdateCategory, slug};
use crate::repository::{Entity, Repository};

use super::loading_key;

pub struct CategoriesService {
    repo: Arc<Repository>,
}

impl CategoriesService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> ApiResponse<Vec<Category>> {
        self.repo.list_all().await
    }

    pub async fn by_id(&self, id: &str) -> ApiResponse<Category> {
        self.repo.get_by_id(id).await
    }

    pub async fn by_slug(&self, slug: &str) -> ApiResponse<Category> {
        let response = self.all().await;
        if !response.success {
            return response.cast();
        }

        match response
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|category| category.slug == slug)
        {
            Some(category) => ApiResponse::ok(category),
            None => ApiResponse::missing(format!("Category with slug '{slug}' not found")),
        }
    }

    pub async fn sorted(&self) -> ApiResponse<Vec<Category>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let mut categories = response.data.unwrap_or_default();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        ApiResponse::ok(categories)
    }

    pub async fn create(&self, input: CreateCategory) -> ApiResponse<Category> {
        self.repo
            .create(|id| Category {
                id,
                slug: slug::slugify(&input.name),
                name: input.name,
                description: input.description,
                color: input.color,
            })
            .await
    }

    /// Merge-patch; a name change regenerates the slug in the same write.
    pub async fn update(&self, id: &str, updates: UpdateCategory) -> ApiResponse<Category> {
        let patch = CategoryPatch {
            slug: updates.name.as_deref().map(slug::slugify),
            name: updates.name,
            description: updates.description,
            color: updates.color,
        };
        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> ApiResponse<bool> {
        self.repo.delete::<Category>(id).await
    }

    pub async fn exists_by_slug(&self, slug: &str) -> bool {
        let response = self.by_slug(slug).await;
        response.success && response.data.is_some()
    }

    pub fn is_loading(&self, operation: &str, id: Option<&str>) -> bool {
        self.repo
            .is_loading(&loading_key(operation, Category::COLLECTION, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::instant_repo_arc;

    fn service() -> CategoriesService {
        CategoriesService::new(instant_repo_arc())
    }

    #[tokio::test]
    async fn create_derives_slug_from_name() {
        let categories = service();
        let category = categories
            .create(CreateCategory {
                name: "Saúde Mental".into(),
                description: "desc".into(),
                color: "#aa55cc".into(),
            })
            .await
            .data
            .unwrap();
        assert_eq!(category.slug, "saude-mental");
    }

    #[tokio::test]
    async fn rename_regenerates_slug_in_same_write() {
        let categories = service();
        let category = categories
            .create(CreateCategory {
                name: "Antigo".into(),
                description: "desc".into(),
                color: "#fff".into(),
            })
            .await
            .data
            .unwrap();

        let renamed = categories
            .update(
                &category.id,
                UpdateCategory {
                    name: Some("Novo Nome".into()),
                    ..UpdateCategory::default()
                },
            )
            .await
            .data
            .unwrap();
        assert_eq!(renamed.name, "Novo Nome");
        assert_eq!(renamed.slug, "novo-nome");
        assert_eq!(renamed.color, "#fff");
    }

    #[tokio::test]
    async fn sorted_orders_by_name() {
        let categories = service();
        for name in ["Carreira", "Autocuidado", "Bem-estar"] {
            categories
                .create(CreateCategory {
                    name: name.into(),
                    description: String::new(),
                    color: String::new(),
                })
                .await;
        }

        let sorted = categories.sorted().await.data.unwrap();
        let names: Vec<_> = sorted.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Autocuidado", "Bem-estar", "Carreira"]);
    }

    #[tokio::test]
    async fn exists_by_slug_reflects_lookup() {
        let categories = service();
        categories
            .create(CreateCategory {
                name: "Vida Real".into(),
                description: String::new(),
                color: String::new(),
            })
            .await;

        assert!(categories.exists_by_slug("vida-real").await);
        assert!(!categories.exists_by_slug("vida-irreal").await);
    }
}
