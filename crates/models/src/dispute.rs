use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dispute")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Reporter, ReportedUser }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Reporter => Entity::belongs_to(user::Entity)
                .from(Column::ReporterId)
                .to(user::Column::Id)
                .into(),
            Relation::ReportedUser => Entity::belongs_to(user::Entity)
                .from(Column::ReportedUserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    reporter_id: Uuid,
    reported_user_id: Uuid,
    reason: &str,
    status: &str,
) -> Result<Model, errors::ModelError> {
    if reason.trim().is_empty() {
        return Err(errors::ModelError::Validation("reason required".into()));
    }
    let am = ActiveModel {
        id: Set(id),
        reporter_id: Set(reporter_id),
        reported_user_id: Set(reported_user_id),
        reason: Set(reason.trim().to_string()),
        status: Set(status.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}

pub async fn set_status<C: ConnectionTrait>(db: &C, id: Uuid, status: &str) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.status = Set(status.to_string());
    let updated = am.update(db).await.map_err(errors::ModelError::from)?;
    Ok(Some(updated))
}
