//! `chorus run`: a conversation among scripted agents

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chorus_core::{
    ChatMessage, ChorusError, ChorusResult, Conversation, ConversationAgent, ConversationConfig,
    ConversationMode, ConversationResult, HistoryTree, RoundContext, TreeMessage,
};
use chorus_session::{LocalTreeStorage, TreeStorage};
use colored::Colorize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Agent that replays a fixed list of replies cyclically
#[derive(Debug)]
pub struct ScriptedAgent {
    name: String,
    prompt: String,
    replies: Vec<String>,
    turn: AtomicUsize,
}

impl ScriptedAgent {
    /// Create an agent from its name and replies
    pub fn new(name: impl Into<String>, replies: Vec<String>) -> Self {
        let name = name.into();
        Self {
            prompt: format!("Scripted agent {}", name),
            name,
            replies,
            turn: AtomicUsize::new(0),
        }
    }

    /// Parse `NAME=REPLY1|REPLY2|...`
    pub fn parse(definition: &str) -> Result<Self> {
        let (name, replies) = definition
            .split_once('=')
            .with_context(|| format!("agent {:?} must look like NAME=REPLY1|REPLY2", definition))?;
        let name = name.trim();
        if name.is_empty() {
            bail!("agent {:?} has an empty name", definition);
        }
        let replies: Vec<String> = replies.split('|').map(str::to_string).collect();
        Ok(Self::new(name, replies))
    }
}

#[async_trait]
impl ConversationAgent for ScriptedAgent {
    fn id(&self) -> &str {
        &self.name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn system_prompt(&self) -> &str {
        &self.prompt
    }

    async fn reply(&self, _ctx: &RoundContext, _messages: &[ChatMessage]) -> ChorusResult<ChatMessage> {
        if self.replies.is_empty() {
            return Err(ChorusError::agent(&self.name, "no scripted replies"));
        }
        let turn = self.turn.fetch_add(1, Ordering::Relaxed);
        Ok(ChatMessage::assistant(
            self.replies[turn % self.replies.len()].clone(),
        ))
    }
}

/// Options for one `run` invocation
pub struct RunOptions {
    pub message: String,
    pub agents: Vec<String>,
    pub mode: ConversationMode,
    pub config: ConversationConfig,
    pub json: bool,
}

/// Run the conversation, print it and optionally save its history tree
pub async fn execute(options: RunOptions, storage: Option<&LocalTreeStorage>) -> Result<()> {
    let agents = options
        .agents
        .iter()
        .map(|definition| {
            ScriptedAgent::parse(definition).map(|a| Arc::new(a) as Arc<dyn ConversationAgent>)
        })
        .collect::<Result<Vec<_>>>()?;

    let conversation = Conversation::new(options.mode, agents, options.config);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let result = match conversation.start(&cancel, options.message).await {
        Ok(result) => result,
        Err(e) => match e.partial_result() {
            Some(partial) => {
                eprintln!("{} {}", "warning:".yellow().bold(), e);
                partial.clone()
            }
            None => return Err(e.into()),
        },
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_transcript(&result);
    }

    if let Some(storage) = storage {
        let tree = record_tree(&result).await;
        storage.save(&tree).await?;
        if !options.json {
            println!(
                "{} {}",
                "Saved history tree".green(),
                result.conversation_id.bold()
            );
        }
    }

    Ok(())
}

/// Record every message of a result into a fresh tree named after the conversation
pub async fn record_tree(result: &ConversationResult) -> HistoryTree {
    let tree = HistoryTree::new(result.conversation_id.clone());
    // a fresh tree always has main active, so append never yields None here
    for message in &result.messages {
        if let Some(state) = tree.append(TreeMessage::from(message)).await {
            debug!(tree = %result.conversation_id, state = %state.id, "recorded message");
        }
    }
    tree
}

fn print_transcript(result: &ConversationResult) {
    println!("\n{}", "Transcript".bold().underline());
    for message in &result.messages {
        let speaker = message
            .sender_id
            .clone()
            .unwrap_or_else(|| message.role.to_string());
        println!("{} {}", format!("[{}]", speaker).cyan(), message.content);
    }
    println!(
        "\n{} {}  {} {}",
        "Rounds:".dimmed(),
        result.total_rounds,
        "Reason:".dimmed(),
        result.termination_reason.to_string().bold()
    );
}
