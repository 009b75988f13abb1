use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{icontains, listing_from, SeaOrmStore};
use crate::catalog::domain::{Listing, ListingFilter, NewListing};
use crate::catalog::repository::ListingRepository;
use crate::errors::ServiceError;
use models::service_listing::{self, Column};

#[async_trait]
impl ListingRepository for SeaOrmStore {
    async fn create_listing(&self, new: NewListing) -> Result<Listing, ServiceError> {
        let created = service_listing::create(
            &self.db,
            service_listing::NewListing {
                id: Uuid::new_v4(),
                provider_id: new.provider_id,
                title: &new.title,
                description: &new.description,
                category: &new.category,
                price: new.price,
                location: &new.location,
                image: &new.image,
            },
        )
        .await?;
        Ok(listing_from(created))
    }

    async fn find_listing(&self, id: Uuid) -> Result<Option<Listing>, ServiceError> {
        Ok(service_listing::Entity::find_by_id(id).one(&self.db).await?.map(listing_from))
    }

    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ServiceError> {
        let f = filter.normalized();
        let mut cond = Condition::all();
        if let Some(needle) = f.search.as_deref() {
            cond = cond.add(
                Condition::any()
                    .add(icontains(Column::Title, needle))
                    .add(icontains(Column::Description, needle))
                    .add(icontains(Column::Category, needle)),
            );
        }
        if let Some(needle) = f.location.as_deref() {
            cond = cond.add(icontains(Column::Location, needle));
        }
        let rows = service_listing::Entity::find()
            .filter(cond)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(listing_from).collect())
    }

    async fn listings_by_provider(&self, provider_id: Uuid) -> Result<Vec<Listing>, ServiceError> {
        let rows = service_listing::Entity::find()
            .filter(Column::ProviderId.eq(provider_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(listing_from).collect())
    }

    async fn find_listings(&self, ids: &[Uuid]) -> Result<Vec<Listing>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = service_listing::Entity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(listing_from).collect())
    }

    async fn count_listings(&self) -> Result<u64, ServiceError> {
        Ok(service_listing::Entity::find().count(&self.db).await?)
    }
}
