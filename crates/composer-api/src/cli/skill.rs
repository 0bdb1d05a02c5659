//! `composer skill`: connect skill bots to root bots.

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum SkillCommand {
    /// Add an intent trigger to the root bot that begins the child bot.
    ///
    /// Only roots using the Orchestrator recognizer are changed.
    Link {
        /// Root project id.
        root: String,

        /// Skill project id.
        child: String,
    },
}

pub async fn run(state: &AppState, action: SkillCommand, json: bool) -> Result<()> {
    match action {
        SkillCommand::Link { root, child } => link(state, &root, &child, json).await,
    }
}

async fn link(state: &AppState, root: &str, child: &str, json: bool) -> Result<()> {
    let dialog = state
        .skill_linker()
        .create_automatic_trigger(root, child)
        .await
        .with_context(|| format!("failed to link '{child}' into '{root}'"))?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "root": root,
                "child": child,
                "linked": dialog.is_some(),
                "dialog": dialog,
            })
        );
        return Ok(());
    }

    match dialog.and_then(|d| d.triggers.last().cloned()) {
        Some(trigger) => println!(
            "  {} Added trigger '{}' to '{}'",
            style("✓").green().bold(),
            style(&trigger.display_name).bold(),
            style(root).cyan()
        ),
        None => println!(
            "  {} '{}' does not use the Orchestrator recognizer; nothing changed",
            style("i").blue().bold(),
            style(root).cyan()
        ),
    }
    Ok(())
}
