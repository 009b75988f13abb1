use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{review_from, SeaOrmStore};
use crate::errors::ServiceError;
use crate::review::{NewReview, Review, ReviewRepository};
use models::review::{self, Column};

#[async_trait]
impl ReviewRepository for SeaOrmStore {
    async fn create_review(&self, new: NewReview) -> Result<Review, ServiceError> {
        let created =
            review::create(&self.db, Uuid::new_v4(), new.service_id, new.user_id, new.rating, &new.comment).await?;
        Ok(review_from(created))
    }

    async fn reviews_for_listing(&self, service_id: Uuid) -> Result<Vec<Review>, ServiceError> {
        let rows = review::Entity::find()
            .filter(Column::ServiceId.eq(service_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(review_from).collect())
    }
}
