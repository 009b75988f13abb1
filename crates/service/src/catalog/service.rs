use std::{collections::HashMap, sync::Arc};

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CreateListingInput, Listing, ListingFilter, ListingView, NewListing};
use super::repository::ListingRepository;
use crate::auth::repository::UserRepository;
use crate::errors::ServiceError;
use crate::policy::{Capability, Identity, Policy};

pub struct CatalogService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> CatalogService<R>
where
    R: ListingRepository + UserRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn search(&self, filter: ListingFilter) -> Result<Vec<ListingView>, ServiceError> {
        let listings = self.repo.search_listings(&filter.normalized()).await?;
        self.with_providers(listings).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ListingView, ServiceError> {
        let listing = self.repo.find_listing(id).await?.ok_or_else(|| ServiceError::not_found("service"))?;
        let provider = self.repo.find_user(listing.provider_id).await?.map(|u| u.summary());
        Ok(ListingView { listing, provider })
    }

    #[instrument(skip(self, input), fields(provider_id = %actor.id))]
    pub async fn create(&self, actor: &Identity, input: CreateListingInput) -> Result<Listing, ServiceError> {
        Policy::authorize(actor, Capability::PublishServices)?;
        for (field, value) in [
            ("title", &input.title),
            ("description", &input.description),
            ("category", &input.category),
            ("location", &input.location),
        ] {
            models::service_listing::validate_required(field, value)?;
        }
        models::service_listing::validate_price(input.price)?;

        let listing = self
            .repo
            .create_listing(NewListing {
                provider_id: actor.id,
                title: input.title.trim().to_string(),
                description: input.description.trim().to_string(),
                category: input.category.trim().to_string(),
                price: input.price,
                location: input.location.trim().to_string(),
                image: input.image.unwrap_or_default().trim().to_string(),
            })
            .await?;
        info!(service_id = %listing.id, "service_created");
        Ok(listing)
    }

    async fn with_providers(&self, listings: Vec<Listing>) -> Result<Vec<ListingView>, ServiceError> {
        let mut ids: Vec<Uuid> = listings.iter().map(|l| l.provider_id).collect();
        ids.sort();
        ids.dedup();
        let providers: HashMap<Uuid, _> =
            self.repo.find_users(&ids).await?.into_iter().map(|u| (u.id, u.summary())).collect();
        Ok(listings
            .into_iter()
            .map(|listing| {
                let provider = providers.get(&listing.provider_id).cloned();
                ListingView { listing, provider }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Role;
    use crate::test_support::{seed_user, MemoryFixture};

    fn input(title: &str, price: f64) -> CreateListingInput {
        CreateListingInput {
            title: title.into(),
            description: "Fixes leaks".into(),
            category: "Home".into(),
            price,
            location: "Pune".into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn only_providers_publish() {
        let fx = MemoryFixture::new();
        let svc = CatalogService::new(fx.store.clone());
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        let err = svc.create(&customer, input("Plumbing", 10.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        let listing = svc.create(&provider, input("Plumbing", 10.0)).await.unwrap();
        assert_eq!(listing.provider_id, provider.id);
        assert_eq!(listing.image, "");
    }

    #[tokio::test]
    async fn rejects_bad_fields() {
        let fx = MemoryFixture::new();
        let svc = CatalogService::new(fx.store.clone());
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        assert!(svc.create(&provider, input("  ", 10.0)).await.is_err());
        assert!(svc.create(&provider, input("Plumbing", -5.0)).await.is_err());
        assert!(svc.create(&provider, input("Plumbing", f64::NAN)).await.is_err());
    }

    #[tokio::test]
    async fn search_includes_provider() {
        let fx = MemoryFixture::new();
        let svc = CatalogService::new(fx.store.clone());
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        svc.create(&provider, input("Emergency Plumbing", 10.0)).await.unwrap();
        svc.create(&provider, input("Maths Tutoring", 20.0)).await.unwrap();

        let hits = svc.search(ListingFilter { search: Some("PLUMB".into()), location: None }).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].listing.title, "Emergency Plumbing");
        assert_eq!(hits[0].provider.as_ref().map(|p| p.id), Some(provider.id));

        let all = svc.search(ListingFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let fx = MemoryFixture::new();
        let svc = CatalogService::new(fx.store.clone());
        assert!(matches!(svc.get(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
    }
}
