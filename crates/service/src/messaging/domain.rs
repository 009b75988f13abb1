use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::domain::UserSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The other party, seen from `me`.
    pub fn counterpart(&self, me: Uuid) -> Uuid {
        if self.sender_id == me { self.recipient_id } else { self.sender_id }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageInput {
    pub recipient_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the conversation list. `user` is `None` when the
/// counterpart no longer resolves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub user: Option<UserSummary>,
    pub last_message: String,
    pub date: DateTime<Utc>,
}

/// Keep the first message per counterpart. `newest_first` must already be
/// ordered by `created_at` descending; the output keeps that order.
pub fn latest_per_counterpart(me: Uuid, newest_first: Vec<Message>) -> Vec<(Uuid, Message)> {
    let mut seen = HashSet::new();
    newest_first
        .into_iter()
        .filter_map(|m| {
            let other = m.counterpart(me);
            seen.insert(other).then_some((other, m))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn msg(from: Uuid, to: Uuid, content: &str, minutes_ago: i64) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: from,
            recipient_id: to,
            content: content.into(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn one_entry_per_counterpart_most_recent_first() {
        let me = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut all = vec![
            msg(me, a, "a-old", 30),
            msg(b, me, "b-only", 20),
            msg(a, me, "a-new", 10),
            msg(me, a, "a-mid", 25),
        ];
        all.sort_by(|x, y| y.created_at.cmp(&x.created_at));

        let out = latest_per_counterpart(me, all);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].0, a);
        assert_eq!(out[0].1.content, "a-new");
        assert_eq!(out[1].0, b);
        assert_eq!(out[1].1.content, "b-only");
    }

    #[test]
    fn empty_history_gives_nothing() {
        assert!(latest_per_counterpart(Uuid::new_v4(), Vec::new()).is_empty());
    }
}
