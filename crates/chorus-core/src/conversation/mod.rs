//! Multi-agent conversations
//!
//! A [`Conversation`] drives a round loop over a flat message log: each round a
//! [`SpeakerSelector`] picks one of the participating [`ConversationAgent`]s,
//! the agent replies, and the reply is appended and checked against the
//! termination conditions. A [`SessionRegistry`] keeps live conversations by id.

mod agent;
mod context;
mod message;
mod mode;
mod orchestrator;
mod registry;
mod selector;

pub use agent::{CompletionClient, ConversationAgent};
pub use context::RoundContext;
pub use message::ChatMessage;
pub use mode::ConversationMode;
pub use orchestrator::{Conversation, ConversationResult, TerminationReason};
pub use registry::SessionRegistry;
pub use selector::{DelegatedSelector, RoundRobinSelector, SpeakerSelector};
