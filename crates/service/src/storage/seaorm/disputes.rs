use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{dispute_from, SeaOrmStore};
use crate::dispute::{Dispute, DisputeRepository, DisputeStatus, NewDispute};
use crate::errors::ServiceError;
use models::dispute::{self, Column};

#[async_trait]
impl DisputeRepository for SeaOrmStore {
    async fn create_dispute(&self, new: NewDispute) -> Result<Dispute, ServiceError> {
        let created = dispute::create(
            &self.db,
            Uuid::new_v4(),
            new.reporter_id,
            new.reported_user_id,
            &new.reason,
            DisputeStatus::Open.as_str(),
        )
        .await?;
        dispute_from(created)
    }

    async fn list_disputes(&self) -> Result<Vec<Dispute>, ServiceError> {
        dispute::Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(dispute_from)
            .collect()
    }

    async fn set_dispute_status(&self, id: Uuid, status: DisputeStatus) -> Result<Option<Dispute>, ServiceError> {
        dispute::set_status(&self.db, id, status.as_str()).await?.map(dispute_from).transpose()
    }

    async fn count_disputes_with_status(&self, status: DisputeStatus) -> Result<u64, ServiceError> {
        Ok(dispute::Entity::find().filter(Column::Status.eq(status.as_str())).count(&self.db).await?)
    }
}
