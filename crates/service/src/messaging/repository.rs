use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Message, NewMessage};
use crate::errors::ServiceError;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create_message(&self, new: NewMessage) -> Result<Message, ServiceError>;
    /// Messages sent or received by `user_id`, newest first.
    async fn messages_involving(&self, user_id: Uuid) -> Result<Vec<Message>, ServiceError>;
    /// Both directions between two users, oldest first.
    async fn messages_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>, ServiceError>;
}
