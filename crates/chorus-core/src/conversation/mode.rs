//! Conversation modes

use serde::{Deserialize, Serialize};

/// How a conversation picks its default speaker selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    /// Agents take turns
    RoundRobin,
    /// A delegated selector chooses the next speaker
    Selector,
    /// Free-form group discussion
    #[default]
    GroupChat,
    /// A manager delegates to the others
    Hierarchical,
    /// Automatic response chain
    AutoReply,
}

impl ConversationMode {
    /// Stable name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::Selector => "selector",
            Self::GroupChat => "group_chat",
            Self::Hierarchical => "hierarchical",
            Self::AutoReply => "auto_reply",
        }
    }
}

impl std::fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
