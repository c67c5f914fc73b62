//! Command routing logic for CLI

use anyhow::{Context, Result};
use chorus_core::ChorusConfig;
use chorus_session::LocalTreeStorage;
use std::path::Path;

use crate::args::{Cli, Commands};
use crate::commands;

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<ChorusConfig> {
    match path {
        Some(path) => ChorusConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ChorusConfig::default()),
    }
}

/// Tree storage rooted at the configured directory or the default location
pub fn tree_storage(config: &ChorusConfig) -> Result<LocalTreeStorage> {
    match &config.storage_dir {
        Some(dir) => Ok(LocalTreeStorage::with_path(dir.clone())),
        None => LocalTreeStorage::new().context("no home directory for tree storage"),
    }
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: ChorusConfig) -> Result<()> {
    match cli.command {
        Commands::Run {
            message,
            agents,
            max_rounds,
            mode,
            save_tree,
            json,
        } => {
            let mut conversation = config.conversation.clone();
            if let Some(max_rounds) = max_rounds {
                conversation = conversation.with_max_rounds(max_rounds);
            }
            let options = commands::run::RunOptions {
                message,
                agents,
                mode: mode.into(),
                config: conversation,
                json,
            };
            let storage = if save_tree {
                Some(tree_storage(&config)?)
            } else {
                None
            };
            commands::run::execute(options, storage.as_ref()).await
        }
        Commands::Tree { action } => {
            let storage = tree_storage(&config)?;
            commands::tree::execute(action, &storage).await
        }
    }
}
