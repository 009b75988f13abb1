//! User directory and admin account management.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::domain::User;
use crate::auth::repository::UserRepository;
use crate::booking::repository::BookingRepository;
use crate::catalog::repository::ListingRepository;
use crate::dispute::{DisputeRepository, DisputeStatus};
use crate::errors::ServiceError;
use crate::policy::{Capability, Identity, Policy};

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: u64,
    pub total_services: u64,
    pub total_bookings: u64,
    pub active_disputes: u64,
}

pub struct AccountService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> AccountService<R>
where
    R: UserRepository + ListingRepository + BookingRepository + DisputeRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Everyone except the caller, sorted by name.
    pub async fn directory(&self, actor: &Identity) -> Result<Vec<User>, ServiceError> {
        Policy::authorize(actor, Capability::Participate)?;
        let mut users: Vec<User> = self.repo.list_users().await?.into_iter().filter(|u| u.id != actor.id).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    pub async fn stats(&self, actor: &Identity) -> Result<Stats, ServiceError> {
        Policy::authorize(actor, Capability::ViewStats)?;
        Ok(Stats {
            total_users: self.repo.count_users().await?,
            total_services: self.repo.count_listings().await?,
            total_bookings: self.repo.count_bookings().await?,
            active_disputes: self.repo.count_disputes_with_status(DisputeStatus::Open).await?,
        })
    }

    /// Newest first.
    pub async fn list(&self, actor: &Identity) -> Result<Vec<User>, ServiceError> {
        Policy::authorize(actor, Capability::ManageUsers)?;
        self.repo.list_users().await
    }

    pub async fn get(&self, actor: &Identity, id: Uuid) -> Result<User, ServiceError> {
        Policy::authorize(actor, Capability::ManageUsers)?;
        self.repo.find_user(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    #[instrument(skip(self), fields(admin_id = %actor.id))]
    pub async fn toggle_verified(&self, actor: &Identity, id: Uuid) -> Result<User, ServiceError> {
        Policy::authorize(actor, Capability::ManageUsers)?;
        let user = self.repo.toggle_verified(id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
        info!(user_id = %user.id, is_verified = user.is_verified, "user_verification_toggled");
        Ok(user)
    }

    #[instrument(skip(self), fields(admin_id = %actor.id))]
    pub async fn delete(&self, actor: &Identity, id: Uuid) -> Result<(), ServiceError> {
        Policy::authorize(actor, Capability::ManageUsers)?;
        if id == actor.id {
            return Err(ServiceError::Validation("admins cannot delete themselves".into()));
        }
        if !self.repo.delete_user(id).await? {
            return Err(ServiceError::not_found("user"));
        }
        info!(user_id = %id, "user_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::booking::domain::NewBooking;
    use crate::dispute::NewDispute;
    use crate::policy::Role;
    use crate::test_support::{seed_listing, seed_named_user, seed_user, MemoryFixture};

    #[tokio::test]
    async fn directory_excludes_caller_and_sorts_by_name() {
        let fx = MemoryFixture::new();
        let svc = AccountService::new(fx.store.clone());
        let me = seed_named_user(&fx.store, "Meera", "m@x.io", Role::Customer).await;
        seed_named_user(&fx.store, "Zubin", "z@x.io", Role::Provider).await;
        seed_named_user(&fx.store, "Arjun", "a@x.io", Role::Provider).await;

        let names: Vec<_> = svc.directory(&me).await.unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, ["Arjun", "Zubin"]);
    }

    #[tokio::test]
    async fn toggle_flips_only_the_flag() {
        let fx = MemoryFixture::new();
        let svc = AccountService::new(fx.store.clone());
        let admin = seed_user(&fx.store, "root@x.io", Role::Admin).await;
        let target = seed_user(&fx.store, "t@x.io", Role::Provider).await;

        let before = fx.store.find_user(target.id).await.unwrap().unwrap();
        let after = svc.toggle_verified(&admin, target.id).await.unwrap();
        assert_eq!(after.is_verified, !before.is_verified);
        assert_eq!(User { is_verified: before.is_verified, ..after.clone() }, before);

        let back = svc.toggle_verified(&admin, target.id).await.unwrap();
        assert_eq!(back, before);
        assert!(matches!(svc.toggle_verified(&admin, Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn stats_count_open_disputes_only() {
        let fx = MemoryFixture::new();
        let svc = AccountService::new(fx.store.clone());
        let admin = seed_user(&fx.store, "root@x.io", Role::Admin).await;
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        let service_id = seed_listing(&fx.store, provider.id, "Painting").await;
        fx.store
            .create_booking(NewBooking { customer_id: customer.id, service_id, date: Utc::now() })
            .await
            .unwrap();
        let open = NewDispute { reporter_id: customer.id, reported_user_id: provider.id, reason: "late".into() };
        fx.store.create_dispute(open.clone()).await.unwrap();
        let closed = fx.store.create_dispute(open).await.unwrap();
        fx.store.set_dispute_status(closed.id, DisputeStatus::Dismissed).await.unwrap();

        let stats = svc.stats(&admin).await.unwrap();
        assert_eq!(stats, Stats { total_users: 3, total_services: 1, total_bookings: 1, active_disputes: 1 });
        assert!(matches!(svc.stats(&customer).await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_cascades_and_guards_self() {
        let fx = MemoryFixture::new();
        let svc = AccountService::new(fx.store.clone());
        let admin = seed_user(&fx.store, "root@x.io", Role::Admin).await;
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        let service_id = seed_listing(&fx.store, provider.id, "Painting").await;
        fx.store
            .create_booking(NewBooking { customer_id: customer.id, service_id, date: Utc::now() })
            .await
            .unwrap();

        assert!(matches!(svc.delete(&admin, admin.id).await, Err(ServiceError::Validation(_))));
        svc.delete(&admin, provider.id).await.unwrap();
        assert_eq!(fx.store.count_listings().await.unwrap(), 0);
        assert_eq!(fx.store.count_bookings().await.unwrap(), 0);
        assert!(matches!(svc.get(&admin, provider.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(&admin, provider.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn admin_listing_is_newest_first() {
        let fx = MemoryFixture::new();
        let svc = AccountService::new(fx.store.clone());
        let admin = seed_user(&fx.store, "root@x.io", Role::Admin).await;
        let later = seed_user(&fx.store, "later@x.io", Role::Customer).await;
        let users = svc.list(&admin).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, later.id);
    }
}
