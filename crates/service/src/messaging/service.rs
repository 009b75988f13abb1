use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::domain::{latest_per_counterpart, Conversation, Message, NewMessage, SendMessageInput};
use super::repository::MessageRepository;
use crate::auth::repository::UserRepository;
use crate::errors::ServiceError;
use crate::policy::{Capability, Identity, Policy};

pub struct MessagingService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> MessagingService<R>
where
    R: MessageRepository + UserRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(sender_id = %actor.id, recipient_id = %input.recipient_id))]
    pub async fn send(&self, actor: &Identity, input: SendMessageInput) -> Result<Message, ServiceError> {
        Policy::authorize(actor, Capability::Participate)?;
        if input.content.trim().is_empty() {
            return Err(ServiceError::Validation("content required".into()));
        }
        if self.repo.find_user(input.recipient_id).await?.is_none() {
            return Err(ServiceError::not_found("recipient"));
        }
        let message = self
            .repo
            .create_message(NewMessage {
                sender_id: actor.id,
                recipient_id: input.recipient_id,
                content: input.content,
                created_at: Utc::now(),
            })
            .await?;
        debug!(message_id = %message.id, "message_sent");
        Ok(message)
    }

    /// All messages between the caller and `other`, oldest first.
    pub async fn thread(&self, actor: &Identity, other: Uuid) -> Result<Vec<Message>, ServiceError> {
        Policy::authorize(actor, Capability::Participate)?;
        self.repo.messages_between(actor.id, other).await
    }

    /// One entry per counterpart with the most recent message, newest first.
    #[instrument(skip(self), fields(user_id = %actor.id))]
    pub async fn conversations(&self, actor: &Identity) -> Result<Vec<Conversation>, ServiceError> {
        Policy::authorize(actor, Capability::Participate)?;
        let latest = latest_per_counterpart(actor.id, self.repo.messages_involving(actor.id).await?);
        let ids: Vec<Uuid> = latest.iter().map(|(id, _)| *id).collect();
        let users: HashMap<Uuid, _> =
            self.repo.find_users(&ids).await?.into_iter().map(|u| (u.id, u.summary())).collect();
        Ok(latest
            .into_iter()
            .map(|(other, m)| Conversation { user: users.get(&other).cloned(), last_message: m.content, date: m.created_at })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Role;
    use crate::test_support::{seed_user, MemoryFixture};

    fn say(to: Uuid, content: &str) -> SendMessageInput {
        SendMessageInput { recipient_id: to, content: content.into() }
    }

    #[tokio::test]
    async fn conversations_keep_latest_per_counterpart() {
        let fx = MemoryFixture::new();
        let svc = MessagingService::new(fx.store.clone());
        let me = seed_user(&fx.store, "me@x.io", Role::Customer).await;
        let a = seed_user(&fx.store, "a@x.io", Role::Provider).await;
        let b = seed_user(&fx.store, "b@x.io", Role::Provider).await;

        svc.send(&me, say(a.id, "hi a")).await.unwrap();
        svc.send(&b, say(me.id, "hello from b")).await.unwrap();
        svc.send(&a, say(me.id, "reply from a")).await.unwrap();

        let list = svc.conversations(&me).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].user.as_ref().map(|u| u.id), Some(a.id));
        assert_eq!(list[0].last_message, "reply from a");
        assert_eq!(list[1].user.as_ref().map(|u| u.id), Some(b.id));
        assert_eq!(list[1].last_message, "hello from b");
        assert!(list[0].date >= list[1].date);
    }

    #[tokio::test]
    async fn thread_is_oldest_first_and_private() {
        let fx = MemoryFixture::new();
        let svc = MessagingService::new(fx.store.clone());
        let me = seed_user(&fx.store, "me@x.io", Role::Customer).await;
        let a = seed_user(&fx.store, "a@x.io", Role::Provider).await;
        let c = seed_user(&fx.store, "c@x.io", Role::Customer).await;

        svc.send(&me, say(a.id, "one")).await.unwrap();
        svc.send(&a, say(me.id, "two")).await.unwrap();
        svc.send(&c, say(a.id, "elsewhere")).await.unwrap();

        let thread = svc.thread(&me, a.id).await.unwrap();
        let contents: Vec<_> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["one", "two"]);
    }

    #[tokio::test]
    async fn send_validates() {
        let fx = MemoryFixture::new();
        let svc = MessagingService::new(fx.store.clone());
        let me = seed_user(&fx.store, "me@x.io", Role::Customer).await;
        let a = seed_user(&fx.store, "a@x.io", Role::Provider).await;
        assert!(matches!(svc.send(&me, say(a.id, "   ")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.send(&me, say(Uuid::new_v4(), "hi")).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleted_counterpart_disappears_with_its_messages() {
        let fx = MemoryFixture::new();
        let svc = MessagingService::new(fx.store.clone());
        let me = seed_user(&fx.store, "me@x.io", Role::Customer).await;
        let a = seed_user(&fx.store, "a@x.io", Role::Provider).await;
        svc.send(&me, say(a.id, "hi")).await.unwrap();
        fx.store.delete_user(a.id).await.unwrap();
        assert!(svc.conversations(&me).await.unwrap().is_empty());
    }
}
