//! Configuration for Chorus
//!
//! Conversation limits, logging preferences and the top-level [`ChorusConfig`]
//! that the CLI loads from TOML.

mod conversation_config;
mod loader;
mod logging_config;
pub mod timeouts;

pub use conversation_config::ConversationConfig;
pub use loader::ChorusConfig;
pub use logging_config::LoggingConfig;
