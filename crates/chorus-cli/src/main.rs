//! Chorus CLI application
//!
//! Runs scripted multi-agent conversations and inspects persisted history
//! trees.
//!
//! ```bash
//! chorus run --agent planner="Plan it|DONE" --agent coder="Code it" "Build a parser"
//! chorus run --save-tree --max-rounds 4 --agent a=hi --agent b=hello "Say hi"
//! chorus tree list
//! chorus tree show <tree-id> --branch main
//! ```

mod args;
mod commands;
mod logging;
mod router;

use anyhow::Result;
use clap::Parser;

use args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = router::load_config(cli.config.as_deref())?;

    // RUST_LOG overrides the configured level
    logging::init(&config.logging, cli.verbose);

    router::route(cli, config).await
}
