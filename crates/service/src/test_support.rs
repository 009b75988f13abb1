#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::auth::domain::NewUser;
use crate::auth::repository::UserRepository;
use crate::catalog::domain::NewListing;
use crate::catalog::repository::ListingRepository;
use crate::policy::{Identity, Role};
use crate::storage::{memory::MemoryStore, seaorm::SeaOrmStore};

pub struct MemoryFixture {
    pub store: Arc<MemoryStore>,
}

impl MemoryFixture {
    pub fn new() -> Self { Self { store: Arc::new(MemoryStore::new()) } }
}

pub async fn seed_named_user(store: &MemoryStore, name: &str, email: &str, role: Role) -> Identity {
    let user = store
        .create_user(NewUser {
            name: name.into(),
            email: email.into(),
            password_hash: "not-a-real-hash".into(),
            role,
            is_verified: false,
        })
        .await
        .expect("seed user");
    Identity::new(user.id, user.role)
}

pub async fn seed_user(store: &MemoryStore, email: &str, role: Role) -> Identity {
    let name = email.split('@').next().unwrap_or(email);
    seed_named_user(store, name, email, role).await
}

pub async fn seed_listing(store: &MemoryStore, provider_id: Uuid, title: &str) -> Uuid {
    store
        .create_listing(NewListing {
            provider_id,
            title: title.into(),
            description: format!("{title} at home"),
            category: "Home".into(),
            price: 40.0,
            location: "Pune".into(),
            image: String::new(),
        })
        .await
        .expect("seed listing")
        .id
}

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// PostgreSQL-backed store, or `None` when `DATABASE_URL` is unset.
pub async fn postgres_store() -> anyhow::Result<Option<SeaOrmStore>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else { return Ok(None) };
    let cfg = models::db::DatabaseConfig { url, min_connections: 1, ..Default::default() };
    MIGRATED
        .get_or_try_init(|| async {
            let db = models::db::connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            anyhow::Ok(())
        })
        .await?;
    Ok(Some(SeaOrmStore::new(models::db::connect_with_config(&cfg).await?)))
}
