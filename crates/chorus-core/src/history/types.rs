//! History tree value types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::conversation::ChatMessage;
use crate::types::MessageRole;

/// Name of the branch every tree starts with; it can never be deleted
pub const MAIN_BRANCH: &str = "main";

/// Tool call carried by a tree message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeToolCall {
    /// Tool call ID
    pub id: String,
    /// Tool name
    pub name: String,
    /// Arguments (JSON)
    pub arguments: Value,
}

/// Message recorded into a history tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeMessage {
    /// Role (user, assistant, system, tool)
    pub role: MessageRole,
    /// Content
    pub content: String,
    /// Optional speaker name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tool calls (assistant messages)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<TreeToolCall>,
    /// Tool call this message answers (tool messages)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl TreeMessage {
    fn with_role(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content)
    }

    /// Create a tool result message
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        let mut message = Self::with_role(MessageRole::Tool, content);
        message.tool_call_id = Some(tool_call_id.into());
        message
    }

    /// Set the speaker name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach tool calls
    pub fn with_tool_calls(mut self, calls: Vec<TreeToolCall>) -> Self {
        self.tool_calls = calls;
        self
    }
}

impl From<&ChatMessage> for TreeMessage {
    fn from(message: &ChatMessage) -> Self {
        let mut tree_message = Self::with_role(message.role, message.content.clone());
        tree_message.name = message.sender_id.clone();
        tree_message
    }
}

/// Immutable snapshot of a message sequence at one point of a branch
///
/// Each state stores the full history up to that point, never a diff.
/// `parent_id` is provenance only: it may name a state that has since been
/// truncated out of every branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedState {
    /// State identifier, unique within its tree
    pub id: String,
    /// State this one was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Full message sequence
    pub messages: Vec<TreeMessage>,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// When this state was created
    pub created_at: DateTime<Utc>,
    /// Optional human label (snapshots, fork/merge provenance)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl VersionedState {
    /// Number of messages in this state
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Whether a snapshot call marked this state
    pub fn is_snapshot(&self) -> bool {
        self.metadata.get("snapshot") == Some(&Value::Bool(true))
    }
}

/// Named, chronologically ordered sequence of states (index 0 = oldest)
///
/// A branch is never empty: truncation always keeps its originating state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch identifier
    pub id: String,
    /// Branch name
    pub name: String,
    /// Description of the branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// States, oldest first
    pub states: Vec<VersionedState>,
    /// When this branch was created
    pub created_at: DateTime<Utc>,
    /// Last time a state was added or removed
    pub updated_at: DateTime<Utc>,
    /// Whether this is the tree's active branch
    pub is_active: bool,
}

impl Branch {
    pub(crate) fn new(name: impl Into<String>, origin: VersionedState, is_active: bool) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: name.clone(),
            name,
            description: None,
            states: vec![origin],
            created_at: now,
            updated_at: now,
            is_active,
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Newest state
    pub fn tip(&self) -> Option<&VersionedState> {
        self.states.last()
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the branch has no states (only possible for malformed data)
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Position of a state within this branch
    pub fn position_of(&self, state_id: &str) -> Option<usize> {
        self.states.iter().position(|s| s.id == state_id)
    }

    pub(crate) fn truncate_to(&mut self, len: usize) {
        self.states.truncate(len);
        self.updated_at = Utc::now();
    }
}
