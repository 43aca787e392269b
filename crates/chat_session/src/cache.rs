//! Client-side cache of conversation queries.
//!
//! Entries are filled by the `refresh_*` calls and dropped by invalidation; a
//! dropped entry is refetched on the next read through
//! [`ConversationCache::conversations_or_fetch`] or
//! [`ConversationCache::conversation_or_fetch`].

use std::collections::BTreeMap;
use std::sync::Mutex;

use chat_api::{ChatApiClient, ChatApiError, Conversation, ConversationId};
use futures_util::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::lock_unpoisoned;

/// Identity of one cached server query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueryKey {
    ConversationList,
    Conversation(ConversationId),
}

/// Receives "this query is stale" notices from a chat session.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self, key: QueryKey);
}

/// Read side of the conversation REST API.
pub trait ConversationService: Send + Sync {
    fn fetch_conversations(&self) -> BoxFuture<'_, Result<Vec<Conversation>, ChatApiError>>;

    fn fetch_conversation(
        &self,
        id: ConversationId,
    ) -> BoxFuture<'_, Result<Conversation, ChatApiError>>;
}

impl ConversationService for ChatApiClient {
    fn fetch_conversations(&self) -> BoxFuture<'_, Result<Vec<Conversation>, ChatApiError>> {
        self.list_conversations().boxed()
    }

    fn fetch_conversation(
        &self,
        id: ConversationId,
    ) -> BoxFuture<'_, Result<Conversation, ChatApiError>> {
        self.get_conversation(id).boxed()
    }
}

#[derive(Debug, Default)]
struct CacheEntries {
    list: Option<Vec<Conversation>>,
    details: BTreeMap<ConversationId, Conversation>,
}

#[derive(Debug, Default)]
pub struct ConversationCache {
    entries: Mutex<CacheEntries>,
}

impl ConversationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, key: QueryKey) -> bool {
        let entries = lock_unpoisoned(&self.entries);
        match key {
            QueryKey::ConversationList => entries.list.is_some(),
            QueryKey::Conversation(id) => entries.details.contains_key(&id),
        }
    }

    pub fn conversations(&self) -> Option<Vec<Conversation>> {
        lock_unpoisoned(&self.entries).list.clone()
    }

    pub fn conversation(&self, id: ConversationId) -> Option<Conversation> {
        lock_unpoisoned(&self.entries).details.get(&id).cloned()
    }

    pub async fn refresh_conversations(
        &self,
        service: &dyn ConversationService,
    ) -> Result<Vec<Conversation>, ChatApiError> {
        let list = service.fetch_conversations().await?;
        lock_unpoisoned(&self.entries).list = Some(list.clone());
        Ok(list)
    }

    pub async fn refresh_conversation(
        &self,
        service: &dyn ConversationService,
        id: ConversationId,
    ) -> Result<Conversation, ChatApiError> {
        let conversation = service.fetch_conversation(id).await?;
        lock_unpoisoned(&self.entries)
            .details
            .insert(id, conversation.clone());
        Ok(conversation)
    }

    pub async fn conversations_or_fetch(
        &self,
        service: &dyn ConversationService,
    ) -> Result<Vec<Conversation>, ChatApiError> {
        match self.conversations() {
            Some(list) => Ok(list),
            None => self.refresh_conversations(service).await,
        }
    }

    pub async fn conversation_or_fetch(
        &self,
        service: &dyn ConversationService,
        id: ConversationId,
    ) -> Result<Conversation, ChatApiError> {
        match self.conversation(id) {
            Some(conversation) => Ok(conversation),
            None => self.refresh_conversation(service, id).await,
        }
    }
}

impl CacheInvalidator for ConversationCache {
    fn invalidate(&self, key: QueryKey) {
        let mut entries = lock_unpoisoned(&self.entries);
        let dropped = match key {
            QueryKey::ConversationList => entries.list.take().is_some(),
            QueryKey::Conversation(id) => entries.details.remove(&id).is_some(),
        };
        debug!(?key, dropped, "invalidated conversation query");
    }
}
