use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{message_from, SeaOrmStore};
use crate::errors::ServiceError;
use crate::messaging::domain::{Message, NewMessage};
use crate::messaging::repository::MessageRepository;
use models::message::{self, Column};

#[async_trait]
impl MessageRepository for SeaOrmStore {
    async fn create_message(&self, new: NewMessage) -> Result<Message, ServiceError> {
        let created = message::create(
            &self.db,
            Uuid::new_v4(),
            new.sender_id,
            new.recipient_id,
            &new.content,
            new.created_at.into(),
        )
        .await?;
        Ok(message_from(created))
    }

    async fn messages_involving(&self, user_id: Uuid) -> Result<Vec<Message>, ServiceError> {
        let rows = message::Entity::find()
            .filter(Condition::any().add(Column::SenderId.eq(user_id)).add(Column::RecipientId.eq(user_id)))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(message_from).collect())
    }

    async fn messages_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>, ServiceError> {
        let pair = Condition::any()
            .add(Condition::all().add(Column::SenderId.eq(a)).add(Column::RecipientId.eq(b)))
            .add(Condition::all().add(Column::SenderId.eq(b)).add(Column::RecipientId.eq(a)));
        let rows = message::Entity::find()
            .filter(pair)
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(message_from).collect())
    }
}
