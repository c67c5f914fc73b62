//! `chorus tree`: inspect and manage saved history trees

use anyhow::{Context, Result};
use chorus_session::{LocalTreeStorage, TreeStorage};
use colored::Colorize;

use crate::args::TreeAction;

/// Execute tree command
pub async fn execute(action: TreeAction, storage: &LocalTreeStorage) -> Result<()> {
    match action {
        TreeAction::List => list_trees(storage).await,
        TreeAction::Show { id, branch } => show_tree(storage, &id, branch.as_deref()).await,
        TreeAction::Branches { id } => list_branches(storage, &id).await,
        TreeAction::Delete { id } => delete_tree(storage, &id).await,
    }
}

async fn list_trees(storage: &LocalTreeStorage) -> Result<()> {
    let trees = storage.list().await?;

    if trees.is_empty() {
        println!("{}", "No saved trees.".yellow());
        return Ok(());
    }

    println!("\n{}", "History Trees".bold().underline());
    for tree in trees {
        println!(
            "  {}  {} branch(es), active {}, {} message(s)",
            tree.id.cyan(),
            tree.branch_count,
            tree.active_branch.bold(),
            tree.message_count
        );
    }
    Ok(())
}

async fn show_tree(storage: &LocalTreeStorage, id: &str, branch: Option<&str>) -> Result<()> {
    let tree = storage.load(id).await?;

    let branch_name = match branch {
        Some(name) => name.to_string(),
        None => tree.active_branch_name().await,
    };
    let branch = tree
        .get_branch(&branch_name)
        .await
        .with_context(|| format!("branch {} not found in tree {}", branch_name, id))?;

    println!("\n{} {}", "Branch".bold(), branch.name.cyan());
    if let Some(description) = &branch.description {
        println!("{}", description.dimmed());
    }

    if let Some(tip) = branch.tip() {
        for message in &tip.messages {
            let speaker = message.name.clone().unwrap_or_else(|| message.role.to_string());
            println!("{} {}", format!("[{}]", speaker).cyan(), message.content);
        }
    }

    let snapshots: Vec<_> = branch
        .states
        .iter()
        .filter(|state| state.is_snapshot())
        .filter_map(|state| state.label.as_deref())
        .collect();
    if !snapshots.is_empty() {
        println!("\n{} {}", "Snapshots:".dimmed(), snapshots.join(", "));
    }
    Ok(())
}

async fn list_branches(storage: &LocalTreeStorage, id: &str) -> Result<()> {
    let tree = storage.load(id).await?;
    let active = tree.active_branch_name().await;

    let mut names = tree.list_branches().await;
    names.sort();

    for name in names {
        let Some(branch) = tree.get_branch(&name).await else {
            continue;
        };
        let marker = if name == active { "*" } else { " " };
        println!(
            "{} {}  {} state(s), updated {}",
            marker.green(),
            name.bold(),
            branch.len(),
            branch.updated_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

async fn delete_tree(storage: &LocalTreeStorage, id: &str) -> Result<()> {
    storage.delete(id).await?;
    println!("{} {}", "Deleted tree".green(), id.bold());
    Ok(())
}
