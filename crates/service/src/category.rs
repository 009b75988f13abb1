//! Admin-curated service categories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::policy::{Capability, Identity, Policy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Sorted by name.
    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError>;
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError>;
    /// Fails with `Conflict` when the name is taken.
    async fn create_category(&self, name: &str) -> Result<Category, ServiceError>;
    async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError>;
}

pub struct CategoryService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: CategoryRepository + ?Sized> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Category>, ServiceError> { self.repo.list_categories().await }

    #[instrument(skip(self, input), fields(admin_id = %actor.id))]
    pub async fn create(&self, actor: &Identity, input: CreateCategoryInput) -> Result<Category, ServiceError> {
        Policy::authorize(actor, Capability::ManageCategories)?;
        models::category::validate_name(&input.name)?;
        let name = input.name.trim();
        if self.repo.find_category_by_name(name).await?.is_some() {
            return Err(ServiceError::Conflict(format!("category '{name}' already exists")));
        }
        let category = self.repo.create_category(name).await?;
        info!(category_id = %category.id, name = %category.name, "category_created");
        Ok(category)
    }

    #[instrument(skip(self), fields(admin_id = %actor.id))]
    pub async fn delete(&self, actor: &Identity, id: Uuid) -> Result<(), ServiceError> {
        Policy::authorize(actor, Capability::ManageCategories)?;
        if !self.repo.delete_category(id).await? {
            return Err(ServiceError::not_found("category"));
        }
        info!(category_id = %id, "category_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Role;
    use crate::test_support::MemoryFixture;

    fn admin() -> Identity { Identity::new(Uuid::new_v4(), Role::Admin) }

    fn named(name: &str) -> CreateCategoryInput { CreateCategoryInput { name: name.into() } }

    #[tokio::test]
    async fn admin_manages_sorted_unique_categories() {
        let fx = MemoryFixture::new();
        let svc = CategoryService::new(fx.store.clone());
        let admin = admin();
        svc.create(&admin, named("Plumbing")).await.unwrap();
        svc.create(&admin, named(" Cleaning ")).await.unwrap();
        let err = svc.create(&admin, named("Plumbing")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let names: Vec<_> = svc.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Cleaning", "Plumbing"]);
    }

    #[tokio::test]
    async fn blank_and_non_admin_rejected() {
        let fx = MemoryFixture::new();
        let svc = CategoryService::new(fx.store.clone());
        assert!(matches!(svc.create(&admin(), named("  ")).await, Err(ServiceError::Model(_))));
        let provider = Identity::new(Uuid::new_v4(), Role::Provider);
        assert!(matches!(svc.create(&provider, named("Tiling")).await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let fx = MemoryFixture::new();
        let svc = CategoryService::new(fx.store.clone());
        let admin = admin();
        let c = svc.create(&admin, named("Gardening")).await.unwrap();
        svc.delete(&admin, c.id).await.unwrap();
        assert!(matches!(svc.delete(&admin, c.id).await, Err(ServiceError::NotFound(_))));
    }
}
