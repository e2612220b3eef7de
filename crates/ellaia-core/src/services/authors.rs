//! Authors service: role-based queries and team ordering.

use std::sync::Arc;

use ellaia_shared::ApiResponse;

use crate::domain::{self, Author, AuthorLinks, AuthorRole, CreateAuthor, RoleCounts, UpdateAuthor};
use crate::repository::{Entity, Repository};

use super::loading_key;

pub struct AuthorsService {
    repo: Arc<Repository>,
}

impl AuthorsService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> ApiResponse<Vec<Author>> {
        self.repo.list_all().await
    }

    pub async fn by_id(&self, id: &str) -> ApiResponse<Author> {
        self.repo.get_by_id(id).await
    }

    pub async fn by_email(&self, email: &str) -> ApiResponse<Author> {
        let response = self.all().await;
        if !response.success {
            return response.cast();
        }

        match response
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|author| author.email == email)
        {
            Some(author) => ApiResponse::ok(author),
            None => ApiResponse::missing(format!("Author with email '{email}' not found")),
        }
    }

    pub async fn by_role(&self, role: AuthorRole) -> ApiResponse<Vec<Author>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let authors = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|author| author.role == role)
            .collect();
        ApiResponse::ok(authors)
    }

    /// Authors with publishing rights: AUTHOR, EDITOR or ADMIN.
    pub async fn active(&self) -> ApiResponse<Vec<Author>> {
        let response = self.all().await;
        if !response.success {
            return response;
        }

        let authors = response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|author| author.role.is_team())
            .collect();
        ApiResponse::ok(authors)
    }

    /// Team listing: ADMIN before EDITOR before AUTHOR, alphabetical
    /// within each rank; readers excluded.
    pub async fn team_members(&self) -> ApiResponse<Vec<Author>> {
        let response = self.active().await;
        if !response.success {
            return response;
        }

        let mut team = response.data.unwrap_or_default();
        team.sort_by(|a, b| {
            a.role
                .rank()
                .cmp(&b.role.rank())
                .then_with(|| a.name.cmp(&b.name))
        });
        ApiResponse::ok(team)
    }

    pub async fn create(&self, input: CreateAuthor) -> ApiResponse<Author> {
        let now = domain::now_iso();
        self.repo
            .create(|id| Author {
                id,
                name: input.name,
                email: input.email,
                role: input.role,
                bio: input.bio,
                avatar: input.avatar,
                links: input.links,
                created_at: now,
            })
            .await
    }

    pub async fn update(&self, id: &str, updates: UpdateAuthor) -> ApiResponse<Author> {
        self.repo.update(id, updates).await
    }

    /// Profile-only update: bio, avatar and links.
    pub async fn update_profile(
        &self,
        id: &str,
        bio: Option<String>,
        avatar: Option<String>,
        links: Option<AuthorLinks>,
    ) -> ApiResponse<Author> {
        self.update(
            id,
            UpdateAuthor {
                bio,
                avatar,
                links,
                ..UpdateAuthor::default()
            },
        )
        .await
    }

    pub async fn change_role(&self, id: &str, role: AuthorRole) -> ApiResponse<Author> {
        self.update(
            id,
            UpdateAuthor {
                role: Some(role),
                ..UpdateAuthor::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> ApiResponse<bool> {
        self.repo.delete::<Author>(id).await
    }

    /// Email uniqueness check; `exclude_id` skips the record being edited.
    pub async fn email_exists(&self, email: &str, exclude_id: Option<&str>) -> bool {
        let response = self.all().await;
        if !response.success {
            return false;
        }

        response
            .data
            .unwrap_or_default()
            .iter()
            .any(|author| author.email == email && Some(author.id.as_str()) != exclude_id)
    }

    pub async fn counts_by_role(&self) -> RoleCounts {
        let response = self.all().await;
        let mut counts = RoleCounts::default();
        let Some(authors) = response.data else {
            return counts;
        };

        for author in authors {
            match author.role {
                AuthorRole::Reader => counts.reader += 1,
                AuthorRole::Author => counts.author += 1,
                AuthorRole::Editor => counts.editor += 1,
                AuthorRole::Admin => counts.admin += 1,
            }
        }
        counts
    }

    pub fn is_loading(&self, operation: &str, id: Option<&str>) -> bool {
        self.repo
            .is_loading(&loading_key(operation, Author::COLLECTION, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::instant_repo_arc;

    fn service() -> AuthorsService {
        AuthorsService::new(instant_repo_arc())
    }

    fn author(name: &str, email: &str, role: AuthorRole) -> CreateAuthor {
        CreateAuthor {
            name: name.into(),
            email: email.into(),
            role,
            bio: String::new(),
            avatar: String::new(),
            links: AuthorLinks::default(),
        }
    }

    async fn seed_mixed_roles(authors: &AuthorsService) {
        authors.create(author("Zoe", "zoe@ellaia.pt", AuthorRole::Author)).await;
        authors.create(author("Ana", "ana@ellaia.pt", AuthorRole::Editor)).await;
        authors.create(author("Rita", "rita@ellaia.pt", AuthorRole::Admin)).await;
        authors.create(author("Bia", "bia@ellaia.pt", AuthorRole::Author)).await;
        authors.create(author("Leitora", "leitora@ellaia.pt", AuthorRole::Reader)).await;
    }

    #[tokio::test]
    async fn team_orders_by_rank_then_name_and_drops_readers() {
        let authors = service();
        seed_mixed_roles(&authors).await;

        let team = authors.team_members().await.data.unwrap();
        let names: Vec<_> = team.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Rita", "Ana", "Bia", "Zoe"]);
    }

    #[tokio::test]
    async fn email_exists_respects_exclusion() {
        let authors = service();
        let created = authors
            .create(author("Ana", "ana@ellaia.pt", AuthorRole::Editor))
            .await
            .data
            .unwrap();

        assert!(authors.email_exists("ana@ellaia.pt", None).await);
        assert!(!authors.email_exists("ana@ellaia.pt", Some(&created.id)).await);
        assert!(!authors.email_exists("outra@ellaia.pt", None).await);
    }

    #[tokio::test]
    async fn change_role_patches_only_role() {
        let authors = service();
        let created = authors
            .create(author("Bia", "bia@ellaia.pt", AuthorRole::Author))
            .await
            .data
            .unwrap();

        let changed = authors
            .change_role(&created.id, AuthorRole::Editor)
            .await
            .data
            .unwrap();
        assert_eq!(changed.role, AuthorRole::Editor);
        assert_eq!(changed.name, "Bia");
        assert_eq!(changed.created_at, created.created_at);
    }

    #[tokio::test]
    async fn counts_cover_every_role() {
        let authors = service();
        seed_mixed_roles(&authors).await;

        let counts = authors.counts_by_role().await;
        assert_eq!(
            counts,
            RoleCounts {
                reader: 1,
                author: 2,
                editor: 1,
                admin: 1
            }
        );
    }
}
