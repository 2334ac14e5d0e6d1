//! Per-user session table
//!
//! Holds the single most recent URL each user submitted, pending selection.
//! A new submission unconditionally overwrites the previous one, discarding
//! any in-progress selection for that user. Entries are never expired; a
//! stale button pressed after a restart simply finds no URL and the caller
//! answers with the expired-session response.
//!
//! The table is owned by `HandlerDeps` and injected into handlers — it is
//! not a process-wide singleton. Keys are per-chat, so cross-user
//! interference cannot occur; same-user races are last-write-wins.

use dashmap::DashMap;
use teloxide::types::ChatId;
use url::Url;

/// Maps a chat to the last link it submitted.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: DashMap<ChatId, Url>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `url` as the chat's current link, replacing any prior value.
    pub fn put(&self, chat_id: ChatId, url: Url) {
        if let Some(previous) = self.current.insert(chat_id, url) {
            log::debug!("Session for chat {} superseded (was {})", chat_id.0, previous);
        }
    }

    /// Returns the chat's current link, or `None` if it never submitted one.
    pub fn get(&self, chat_id: ChatId) -> Option<Url> {
        self.current.get(&chat_id).map(|entry| entry.value().clone())
    }
}
