//! # Ellaia Demo
//!
//! Wires the infrastructure into the data services, seeds the store from
//! the bundled fixtures and walks through the main read paths - the
//! stand-in for the out-of-scope view layer.

use std::sync::Arc;

use anyhow::Result;

use ellaia_core::services::{AuthorsService, CategoriesService, ContactService, PostsService};
use ellaia_core::{Repository, RepositoryConfig};
use ellaia_infra::{DirFixtures, FileStore, MemoryStore};
use ellaia_shared::ApiResponse;

use ellaia_core::ports::CollectionStore;

mod config;

use config::DemoConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = DemoConfig::from_env();
    tracing::info!(
        delay = ?config.delay,
        assets = %config.assets_dir.display(),
        "Starting Ellaia demo"
    );

    let store: Arc<dyn CollectionStore> = match &config.data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using file-backed store");
            Arc::new(FileStore::new(dir))
        }
        None => {
            tracing::info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    let fixtures = Arc::new(DirFixtures::new(&config.assets_dir));

    let repo = Arc::new(Repository::new(
        store,
        fixtures,
        RepositoryConfig {
            delay: config.delay,
            ..RepositoryConfig::default()
        },
    ));
    repo.adapter().seed_if_absent().await;

    let posts = PostsService::new(repo.clone());
    let categories = CategoriesService::new(repo.clone());
    let authors = AuthorsService::new(repo.clone());
    let contact = ContactService::new(repo.clone());

    if let Some(list) = data_or_warn(posts.featured(3).await, "featured posts") {
        println!("Em destaque:");
        for post in list {
            println!("  {} ({} min de leitura)", post.title, post.reading_time);
        }
    }

    if let Some(list) = data_or_warn(categories.sorted().await, "categories") {
        let names: Vec<_> = list.iter().map(|c| c.name.as_str()).collect();
        println!("Categorias: {}", names.join(", "));
    }

    if let Some(team) = data_or_warn(authors.team_members().await, "team members") {
        println!("Equipa:");
        for member in team {
            println!("  {} - {:?}", member.name, member.role);
        }
    }

    let submitted = contact
        .submit(ellaia_core::domain::ContactForm {
            first_name: "Joana".into(),
            last_name: "Silva".into(),
            email: "joana@exemplo.pt".into(),
            subject: "Olá".into(),
            message: "Adorei o blog!".into(),
            newsletter: Some(false),
            privacy: true,
        })
        .await;
    println!("Contacto: {}", submitted.message.unwrap_or_default());

    Ok(())
}

/// Unwrap the envelope, logging failed responses instead of printing them.
fn data_or_warn<T>(response: ApiResponse<T>, context: &str) -> Option<T> {
    if !response.success {
        tracing::warn!(context, message = ?response.message, "request failed");
        return None;
    }
    response.data
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,demo=debug,ellaia_core=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
