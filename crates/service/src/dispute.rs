//! User reports, resolved by an admin.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::domain::UserSummary;
use crate::auth::repository::UserRepository;
use crate::errors::ServiceError;
use crate::policy::{Capability, Identity, Policy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisputeStatus {
    Open,
    Resolved,
    Dismissed,
}

impl DisputeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeStatus::Open => "open",
            DisputeStatus::Resolved => "resolved",
            DisputeStatus::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DisputeStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(DisputeStatus::Open),
            "resolved" => Ok(DisputeStatus::Resolved),
            "dismissed" => Ok(DisputeStatus::Dismissed),
            "" => Err(ServiceError::InvalidStatus("status required".into())),
            other => Err(ServiceError::InvalidStatus(format!("unknown dispute status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: String,
    pub status: DisputeStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisputeInput {
    pub reported_user: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisputeStatusInput {
    #[serde(default, deserialize_with = "crate::booking::domain::lenient_status")]
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewDispute {
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeView {
    #[serde(flatten)]
    pub dispute: Dispute,
    pub reporter: Option<UserSummary>,
    pub reported_user: Option<UserSummary>,
}

#[async_trait]
pub trait DisputeRepository: Send + Sync {
    /// Inserts in `open`.
    async fn create_dispute(&self, new: NewDispute) -> Result<Dispute, ServiceError>;
    /// Newest first.
    async fn list_disputes(&self) -> Result<Vec<Dispute>, ServiceError>;
    async fn set_dispute_status(&self, id: Uuid, status: DisputeStatus) -> Result<Option<Dispute>, ServiceError>;
    async fn count_disputes_with_status(&self, status: DisputeStatus) -> Result<u64, ServiceError>;
}

pub struct DisputeService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> DisputeService<R>
where
    R: DisputeRepository + UserRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(reporter_id = %actor.id, reported_id = %input.reported_user))]
    pub async fn report(&self, actor: &Identity, input: CreateDisputeInput) -> Result<Dispute, ServiceError> {
        Policy::authorize(actor, Capability::Participate)?;
        if input.reported_user == actor.id {
            return Err(ServiceError::Validation("cannot report yourself".into()));
        }
        if input.reason.trim().is_empty() {
            return Err(ServiceError::Validation("reason required".into()));
        }
        if self.repo.find_user(input.reported_user).await?.is_none() {
            return Err(ServiceError::not_found("reported user"));
        }
        let dispute = self
            .repo
            .create_dispute(NewDispute {
                reporter_id: actor.id,
                reported_user_id: input.reported_user,
                reason: input.reason.trim().to_string(),
            })
            .await?;
        info!(dispute_id = %dispute.id, "dispute_opened");
        Ok(dispute)
    }

    pub async fn list(&self, actor: &Identity) -> Result<Vec<DisputeView>, ServiceError> {
        Policy::authorize(actor, Capability::ManageDisputes)?;
        let disputes = self.repo.list_disputes().await?;
        let ids: Vec<Uuid> = disputes.iter().flat_map(|d| [d.reporter_id, d.reported_user_id]).collect();
        let users: HashMap<Uuid, _> =
            self.repo.find_users(&ids).await?.into_iter().map(|u| (u.id, u.summary())).collect();
        Ok(disputes
            .into_iter()
            .map(|dispute| DisputeView {
                reporter: users.get(&dispute.reporter_id).cloned(),
                reported_user: users.get(&dispute.reported_user_id).cloned(),
                dispute,
            })
            .collect())
    }

    #[instrument(skip(self), fields(admin_id = %actor.id))]
    pub async fn set_status(&self, actor: &Identity, id: Uuid, requested: &str) -> Result<Dispute, ServiceError> {
        Policy::authorize(actor, Capability::ManageDisputes)?;
        let status: DisputeStatus = requested.parse()?;
        let dispute = self
            .repo
            .set_dispute_status(id, status)
            .await?
            .ok_or_else(|| ServiceError::not_found("dispute"))?;
        info!(dispute_id = %dispute.id, status = %status, "dispute_status_changed");
        Ok(dispute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Role;
    use crate::test_support::{seed_user, MemoryFixture};

    fn report(against: Uuid, reason: &str) -> CreateDisputeInput {
        CreateDisputeInput { reported_user: against, reason: reason.into() }
    }

    #[tokio::test]
    async fn report_then_resolve() {
        let fx = MemoryFixture::new();
        let svc = DisputeService::new(fx.store.clone());
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;
        let admin = seed_user(&fx.store, "a@x.io", Role::Admin).await;

        let d = svc.report(&customer, report(provider.id, "no show")).await.unwrap();
        assert_eq!(d.status, DisputeStatus::Open);

        let list = svc.list(&admin).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].reporter.as_ref().map(|u| u.id), Some(customer.id));
        assert_eq!(list[0].reported_user.as_ref().map(|u| u.id), Some(provider.id));

        let resolved = svc.set_status(&admin, d.id, "resolved").await.unwrap();
        assert_eq!(resolved.status, DisputeStatus::Resolved);
        assert!(matches!(svc.set_status(&admin, d.id, "closed").await, Err(ServiceError::InvalidStatus(_))));
        assert!(matches!(svc.set_status(&admin, Uuid::new_v4(), "open").await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn report_validation() {
        let fx = MemoryFixture::new();
        let svc = DisputeService::new(fx.store.clone());
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        let provider = seed_user(&fx.store, "p@x.io", Role::Provider).await;

        assert!(matches!(svc.report(&customer, report(customer.id, "me")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.report(&customer, report(provider.id, "  ")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.report(&customer, report(Uuid::new_v4(), "ghost")).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn only_admin_moderates() {
        let fx = MemoryFixture::new();
        let svc = DisputeService::new(fx.store.clone());
        let customer = seed_user(&fx.store, "c@x.io", Role::Customer).await;
        assert!(matches!(svc.list(&customer).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(svc.set_status(&customer, Uuid::new_v4(), "resolved").await, Err(ServiceError::Forbidden(_))));
    }
}
