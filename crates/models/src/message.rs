use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Sender, Recipient }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Sender => Entity::belongs_to(user::Entity)
                .from(Column::SenderId)
                .to(user::Column::Id)
                .into(),
            Relation::Recipient => Entity::belongs_to(user::Entity)
                .from(Column::RecipientId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    sender_id: Uuid,
    recipient_id: Uuid,
    content: &str,
    created_at: DateTimeWithTimeZone,
) -> Result<Model, errors::ModelError> {
    if content.trim().is_empty() {
        return Err(errors::ModelError::Validation("content required".into()));
    }
    let am = ActiveModel {
        id: Set(id),
        sender_id: Set(sender_id),
        recipient_id: Set(recipient_id),
        content: Set(content.to_string()),
        created_at: Set(created_at),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
