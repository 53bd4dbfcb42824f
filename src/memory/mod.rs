//! Conversation memory for the Learning Assistant.
//!
//! Conversations are kept in process memory, keyed by a client-chosen id and
//! owned by the `user_id` that started them. Only the most recent turns are
//! replayed to the model, and once the store is full the least recently used
//! conversation is evicted.

use crate::llm::coordinator::ConversationMessage;
use crate::types::{AppError, Result, utc_timestamp};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use utoipa::ToSchema;

/// Default number of recent messages replayed to the model.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Turns kept per conversation; older ones are dropped.
pub const MAX_STORED_TURNS: usize = 200;

/// Conversations kept before the least recently used one is evicted.
pub const DEFAULT_MAX_CONVERSATIONS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Turn {
    /// `user` or `assistant`
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Conversation {
    pub conversation_id: String,
    pub user_id: String,
    pub created_at: String,
    pub turns: Vec<Turn>,
}

/// Keeps the last `window_size` messages.
pub fn truncate_history(history: &[ConversationMessage], window_size: usize) -> Vec<ConversationMessage> {
    if history.len() <= window_size {
        history.to_vec()
    } else {
        history[history.len() - window_size..].to_vec()
    }
}

fn turn_to_message(turn: &Turn) -> ConversationMessage {
    match turn.role.as_str() {
        "assistant" => ConversationMessage::assistant(turn.content.clone(), vec![]),
        _ => ConversationMessage::user(turn.content.clone()),
    }
}

struct Entry {
    conversation: Conversation,
    last_used: u64,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    clock: u64,
}

impl Inner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            debug!(conversation_id = %id, "evicting conversation");
            self.entries.remove(&id);
        }
    }
}

pub struct ConversationStore {
    inner: RwLock<Inner>,
    history_window: usize,
    max_conversations: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

impl ConversationStore {
    pub fn new(history_window: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            history_window,
            max_conversations: DEFAULT_MAX_CONVERSATIONS,
        }
    }

    /// Cap the number of stored conversations (at least one is kept).
    pub fn with_max_conversations(mut self, max_conversations: usize) -> Self {
        self.max_conversations = max_conversations.max(1);
        self
    }

    fn not_found(conversation_id: &str) -> AppError {
        AppError::NotFound(format!("Conversation not found: {}", conversation_id))
    }

    /// Recent messages of a conversation, oldest first.
    ///
    /// An unknown id yields an empty history; an id owned by another user is
    /// reported as not found.
    pub fn history(&self, conversation_id: &str, user_id: &str) -> Result<Vec<ConversationMessage>> {
        let inner = self.inner.read();
        let Some(entry) = inner.entries.get(conversation_id) else {
            return Ok(Vec::new());
        };
        if entry.conversation.user_id != user_id {
            return Err(Self::not_found(conversation_id));
        }

        let messages: Vec<ConversationMessage> =
            entry.conversation.turns.iter().map(turn_to_message).collect();
        Ok(truncate_history(&messages, self.history_window))
    }

    /// Append a question and its answer, creating the conversation if needed.
    pub fn record_exchange(
        &self,
        conversation_id: &str,
        user_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<()> {
        let mut inner = self.inner.write();
        let now_tick = inner.tick();

        if !inner.entries.contains_key(conversation_id) {
            while inner.entries.len() >= self.max_conversations {
                inner.evict_least_recent();
            }
            inner.entries.insert(
                conversation_id.to_string(),
                Entry {
                    conversation: Conversation {
                        conversation_id: conversation_id.to_string(),
                        user_id: user_id.to_string(),
                        created_at: utc_timestamp(),
                        turns: Vec::new(),
                    },
                    last_used: now_tick,
                },
            );
        }

        let Some(entry) = inner.entries.get_mut(conversation_id) else {
            return Err(Self::not_found(conversation_id));
        };
        if entry.conversation.user_id != user_id {
            return Err(Self::not_found(conversation_id));
        }
        entry.last_used = now_tick;

        let now = utc_timestamp();
        let turns = &mut entry.conversation.turns;
        for (role, content) in [("user", question), ("assistant", answer)] {
            turns.push(Turn {
                role: role.to_string(),
                content: content.to_string(),
                timestamp: now.clone(),
            });
        }

        let excess = turns.len().saturating_sub(MAX_STORED_TURNS);
        turns.drain(..excess);
        Ok(())
    }

    /// A conversation owned by `user_id`.
    pub fn get(&self, conversation_id: &str, user_id: &str) -> Result<Conversation> {
        self.inner
            .read()
            .entries
            .get(conversation_id)
            .filter(|entry| entry.conversation.user_id == user_id)
            .map(|entry| entry.conversation.clone())
            .ok_or_else(|| Self::not_found(conversation_id))
    }

    /// Remove a conversation owned by `user_id`, returning how many turns it held.
    pub fn clear(&self, conversation_id: &str, user_id: &str) -> Result<usize> {
        let mut inner = self.inner.write();
        let owned = inner
            .entries
            .get(conversation_id)
            .is_some_and(|entry| entry.conversation.user_id == user_id);
        if !owned {
            return Err(Self::not_found(conversation_id));
        }
        inner
            .entries
            .remove(conversation_id)
            .map(|entry| entry.conversation.turns.len())
            .ok_or_else(|| Self::not_found(conversation_id))
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::coordinator::MessageRole;

    #[test]
    fn test_unknown_conversation_has_empty_history() {
        let store = ConversationStore::default();
        assert!(store.history("c1", "u1").unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_exchange_round_trip() {
        let store = ConversationStore::default();
        store
            .record_exchange("c1", "u1", "What is SEO?", "Search engine optimization.")
            .unwrap();

        let history = store.history("c1", "u1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].content, "Search engine optimization.");

        let conversation = store.get("c1", "u1").unwrap();
        assert_eq!(conversation.user_id, "u1");
        assert_eq!(conversation.turns[0].role, "user");
    }

    #[test]
    fn test_history_window() {
        let store = ConversationStore::new(4);
        for i in 0..5 {
            store
                .record_exchange("c1", "u1", &format!("q{}", i), &format!("a{}", i))
                .unwrap();
        }
        let history = store.history("c1", "u1").unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "q3");
        assert_eq!(history[3].content, "a4");
    }

    #[test]
    fn test_other_users_conversation_is_hidden() {
        let store = ConversationStore::default();
        store.record_exchange("c1", "u1", "q", "a").unwrap();

        assert!(matches!(store.history("c1", "u2"), Err(AppError::NotFound(_))));
        assert!(matches!(
            store.record_exchange("c1", "u2", "q", "a"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.get("c1", "u2"), Err(AppError::NotFound(_))));
        assert!(matches!(store.clear("c1", "u2"), Err(AppError::NotFound(_))));
        assert_eq!(store.get("c1", "u1").unwrap().turns.len(), 2);
    }

    #[test]
    fn test_clear() {
        let store = ConversationStore::default();
        store.record_exchange("c1", "u1", "q", "a").unwrap();
        assert_eq!(store.clear("c1", "u1").unwrap(), 2);
        assert!(matches!(store.clear("c1", "u1"), Err(AppError::NotFound(_))));
        assert!(matches!(store.get("c1", "u1"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_least_recently_used_conversation_is_evicted() {
        let store = ConversationStore::default().with_max_conversations(2);
        store.record_exchange("c1", "u1", "q", "a").unwrap();
        store.record_exchange("c2", "u1", "q", "a").unwrap();
        // c1 is used again, so c2 becomes the oldest
        store.record_exchange("c1", "u1", "q2", "a2").unwrap();
        store.record_exchange("c3", "u1", "q", "a").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("c1", "u1").unwrap().turns.len(), 4);
        assert!(matches!(store.get("c2", "u1"), Err(AppError::NotFound(_))));
        assert!(store.get("c3", "u1").is_ok());
    }

    #[test]
    fn test_fresh_ids_do_not_grow_past_the_cap() {
        let store = ConversationStore::default().with_max_conversations(5);
        for i in 0..50 {
            store
                .record_exchange(&format!("c{}", i), "u1", "q", "a")
                .unwrap();
        }
        assert_eq!(store.len(), 5);
        assert!(store.get("c49", "u1").is_ok());
        assert!(store.get("c44", "u1").is_err());
    }

    #[test]
    fn test_truncate_history() {
        let messages: Vec<_> = (0..3).map(|i| ConversationMessage::user(i.to_string())).collect();
        assert_eq!(truncate_history(&messages, 5).len(), 3);
        assert_eq!(truncate_history(&messages, 2)[0].content, "1");
    }
}
