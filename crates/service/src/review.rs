//! Immutable ratings left on a service.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::domain::PersonRef;
use crate::auth::repository::UserRepository;
use crate::catalog::repository::ListingRepository;
use crate::errors::ServiceError;
use crate::policy::{Capability, Identity, Policy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewInput {
    pub service_id: Uuid,
    pub rating: i16,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub comment: String,
}

/// Review with its author.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub user: Option<PersonRef>,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create_review(&self, new: NewReview) -> Result<Review, ServiceError>;
    /// Newest first.
    async fn reviews_for_listing(&self, service_id: Uuid) -> Result<Vec<Review>, ServiceError>;
}

pub struct ReviewService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> ReviewService<R>
where
    R: ReviewRepository + ListingRepository + UserRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn for_listing(&self, service_id: Uuid) -> Result<Vec<ReviewView>, ServiceError> {
        let reviews = self.repo.reviews_for_listing(service_id).await?;
        let ids: Vec<Uuid> = reviews.iter().map(|r| r.user_id).collect();
        let authors: HashMap<Uuid, _> =
            self.repo.find_users(&ids).await?.into_iter().map(|u| (u.id, u.person())).collect();
        Ok(reviews
            .into_iter()
            .map(|review| ReviewView { user: authors.get(&review.user_id).cloned(), review })
            .collect())
    }

    #[instrument(skip(self, input), fields(user_id = %actor.id, service_id = %input.service_id))]
    pub async fn create(&self, actor: &Identity, input: CreateReviewInput) -> Result<Review, ServiceError> {
        Policy::authorize(actor, Capability::Participate)?;
        if self.repo.find_listing(input.service_id).await?.is_none() {
            return Err(ServiceError::not_found("service"));
        }
        models::review::validate_rating(input.rating)?;
        if input.comment.trim().is_empty() {
            return Err(ServiceError::Validation("comment required".into()));
        }
        let review = self
            .repo
            .create_review(NewReview {
                service_id: input.service_id,
                user_id: actor.id,
                rating: input.rating,
                comment: input.comment.trim().to_string(),
            })
            .await?;
        info!(review_id = %review.id, rating = review.rating, "review_created");
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Role;
    use crate::test_support::{seed_listing, seed_user, MemoryFixture};

    #[tokio::test]
    async fn review_round_trip_with_author() {
        let fx = MemoryFixture::new();
        let svc = ReviewService::new(fx.store.clone());
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        let service_id = seed_listing(&fx.store, provider.id, "Tiling").await;

        svc.create(&customer, CreateReviewInput { service_id, rating: 5, comment: "Neat job".into() })
            .await
            .unwrap();
        let list = svc.for_listing(service_id).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].review.rating, 5);
        assert_eq!(list[0].user.as_ref().map(|u| u.id), Some(customer.id));
    }

    #[tokio::test]
    async fn rejects_out_of_range_and_missing() {
        let fx = MemoryFixture::new();
        let svc = ReviewService::new(fx.store.clone());
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        let service_id = seed_listing(&fx.store, provider.id, "Tiling").await;

        for rating in [0, 6] {
            let err = svc
                .create(&customer, CreateReviewInput { service_id, rating, comment: "x".into() })
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::Model(_)));
        }
        let err = svc
            .create(&customer, CreateReviewInput { service_id, rating: 3, comment: " ".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = svc
            .create(&customer, CreateReviewInput { service_id: Uuid::new_v4(), rating: 3, comment: "ok".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
