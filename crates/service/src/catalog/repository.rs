use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Listing, ListingFilter, NewListing};
use crate::errors::ServiceError;

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create_listing(&self, new: NewListing) -> Result<Listing, ServiceError>;
    async fn find_listing(&self, id: Uuid) -> Result<Option<Listing>, ServiceError>;
    /// Newest first.
    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ServiceError>;
    async fn listings_by_provider(&self, provider_id: Uuid) -> Result<Vec<Listing>, ServiceError>;
    async fn find_listings(&self, ids: &[Uuid]) -> Result<Vec<Listing>, ServiceError>;
    async fn count_listings(&self) -> Result<u64, ServiceError>;
}
