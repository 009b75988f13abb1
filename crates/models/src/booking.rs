use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, service_listing, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub status: String,
    pub payment_status: String,
    pub date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Customer, Service }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(user::Entity)
                .from(Column::CustomerId)
                .to(user::Column::Id)
                .into(),
            Relation::Service => Entity::belongs_to(service_listing::Entity)
                .from(Column::ServiceId)
                .to(service_listing::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub struct NewBooking<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub status: &'a str,
    pub payment_status: &'a str,
    pub date: DateTimeWithTimeZone,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewBooking<'_>) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(new.id),
        customer_id: Set(new.customer_id),
        service_id: Set(new.service_id),
        status: Set(new.status.to_string()),
        payment_status: Set(new.payment_status.to_string()),
        date: Set(new.date),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}

/// Overwrite status and payment status. Last write wins.
pub async fn set_state<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    status: &str,
    payment_status: &str,
) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::Validation("booking not found".into()))?
        .into();
    found.status = Set(status.to_string());
    found.payment_status = Set(payment_status.to_string());
    found.update(db).await.map_err(errors::ModelError::from)
}
