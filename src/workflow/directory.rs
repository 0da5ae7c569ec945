//! Chat directory
//!
//! Holds the fetched chat list as a time-boxed snapshot and offers
//! filtered views. Filtering never mutates the underlying list.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::chat::{Chat, ChatFilters};
use crate::services::BackendService;
use crate::utils::errors::Result;

/// In-memory snapshot of the managed chat fleet
#[derive(Debug, Clone, Default)]
pub struct ChatDirectory {
    chats: Vec<Chat>,
    fetched_at: Option<DateTime<Utc>>,
}

impl ChatDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a fresh fetch from the backend
    pub async fn refresh(&mut self, backend: &BackendService) -> Result<()> {
        let chats = backend.list_chats().await?;
        debug!(count = chats.len(), "Chat directory snapshot replaced");
        self.chats = chats;
        self.fetched_at = Some(Utc::now());
        Ok(())
    }

    /// Replace the snapshot directly (used by tests and warm starts)
    pub fn replace(&mut self, chats: Vec<Chat>) {
        self.chats = chats;
        self.fetched_at = Some(Utc::now());
    }

    /// Whether the snapshot is older than the given TTL (or never fetched)
    pub fn is_stale(&self, ttl: Duration) -> bool {
        match self.fetched_at {
            Some(fetched_at) => Utc::now() - fetched_at > ttl,
            None => true,
        }
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn get(&self, chat_id: i64) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == chat_id)
    }

    pub fn contains(&self, chat_id: i64) -> bool {
        self.get(chat_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// A filtered view over the snapshot
    pub fn filter(&self, filters: &ChatFilters) -> Vec<&Chat> {
        self.chats.iter().filter(|c| filters.matches(c)).collect()
    }

    /// Ids of all chats passing the filters
    pub fn filtered_ids(&self, filters: &ChatFilters) -> Vec<i64> {
        self.filter(filters).iter().map(|c| c.id).collect()
    }

    /// Ids of every chat in the snapshot
    pub fn all_ids(&self) -> Vec<i64> {
        self.chats.iter().map(|c| c.id).collect()
    }
}
