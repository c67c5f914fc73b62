//! Registry of live conversations

use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

use super::agent::ConversationAgent;
use super::mode::ConversationMode;
use super::orchestrator::Conversation;
use crate::config::ConversationConfig;
use crate::ids::{SharedIdGenerator, default_id_generator};

/// Keyed store of conversations, indexed by conversation id
///
/// Entries are never evicted; the registry grows with every created session.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Conversation>>,
    ids: SharedIdGenerator,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Create an empty registry with random identifiers
    pub fn new() -> Self {
        Self::with_id_generator(default_id_generator())
    }

    /// Create an empty registry drawing ids from `ids`
    pub fn with_id_generator(ids: SharedIdGenerator) -> Self {
        Self {
            sessions: DashMap::new(),
            ids,
        }
    }

    /// Create and store a group-chat conversation
    pub fn create_session(
        &self,
        agents: Vec<Arc<dyn ConversationAgent>>,
        config: ConversationConfig,
    ) -> Arc<Conversation> {
        self.create_session_with(ConversationMode::GroupChat, agents, config)
    }

    /// Create and store a conversation in the given mode
    pub fn create_session_with(
        &self,
        mode: ConversationMode,
        agents: Vec<Arc<dyn ConversationAgent>>,
        config: ConversationConfig,
    ) -> Arc<Conversation> {
        let conversation = Arc::new(
            Conversation::new(mode, agents, config).with_id_generator(Arc::clone(&self.ids)),
        );
        let id = conversation.id().to_string();
        self.sessions.insert(id.clone(), Arc::clone(&conversation));

        info!(session_id = %id, mode = %mode, "created session");
        conversation
    }

    /// Look up a session
    pub fn get_session(&self, id: &str) -> Option<Arc<Conversation>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Ids of every stored session, in no particular order
    pub fn list_sessions(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of stored sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
