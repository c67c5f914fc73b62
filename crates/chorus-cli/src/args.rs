//! CLI argument definitions using clap

use chorus_core::ConversationMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chorus")]
#[command(about = "Chorus - multi-agent turn-taking with branchable history")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "CHORUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a conversation among scripted agents
    Run {
        /// Initial user message
        message: String,

        /// Agent definition NAME=REPLY1|REPLY2|...; replies are replayed cyclically
        #[arg(long = "agent", short = 'a', required = true)]
        agents: Vec<String>,

        /// Override the configured round limit
        #[arg(long)]
        max_rounds: Option<usize>,

        /// Conversation mode (selects the default speaker selector)
        #[arg(long, value_enum, default_value = "round-robin")]
        mode: ModeArg,

        /// Record the transcript into a history tree and save it
        #[arg(long)]
        save_tree: bool,

        /// Print the result as JSON instead of a transcript
        #[arg(long)]
        json: bool,
    },

    /// Inspect and manage saved history trees
    Tree {
        #[command(subcommand)]
        action: TreeAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum TreeAction {
    /// List saved trees
    List,

    /// Show the messages of a tree's branch
    Show {
        /// Tree ID
        id: String,

        /// Branch to show (defaults to the active branch)
        #[arg(long)]
        branch: Option<String>,
    },

    /// List a tree's branches
    Branches {
        /// Tree ID
        id: String,
    },

    /// Delete a saved tree
    Delete {
        /// Tree ID
        id: String,
    },
}

/// Conversation mode accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    RoundRobin,
    Selector,
    GroupChat,
    Hierarchical,
    AutoReply,
}

impl From<ModeArg> for ConversationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::RoundRobin => ConversationMode::RoundRobin,
            ModeArg::Selector => ConversationMode::Selector,
            ModeArg::GroupChat => ConversationMode::GroupChat,
            ModeArg::Hierarchical => ConversationMode::Hierarchical,
            ModeArg::AutoReply => ConversationMode::AutoReply,
        }
    }
}
