//! `composer response`: write-through editing of a structured response
//! template in a workspace project.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use console::style;

use composer_core::editor::CardKind;
use composer_types::modality::{AttachmentLayout, InputHint, ModalityKind};

use crate::state::{AppState, ConcreteEditor};

/// Which template to edit.
#[derive(Args, Clone)]
pub struct TemplateTarget {
    /// Project id.
    #[arg(long, short)]
    pub project: String,

    /// LG file id, e.g. `main.en-us`.
    #[arg(long, short)]
    pub file: String,

    /// Template name, e.g. `bfdactivity-123456`.
    #[arg(long, short)]
    pub template: String,
}

#[derive(Subcommand)]
pub enum ResponseCommand {
    /// Show the open modalities and their content.
    Show {
        #[command(flatten)]
        target: TemplateTarget,
    },

    /// Replace the text variations (opens the Text tab if needed).
    Text {
        #[command(flatten)]
        target: TemplateTarget,

        /// One argument per variation; none removes the text.
        variations: Vec<String>,
    },

    /// Replace the speech variations (opens the Speak tab if needed).
    Speak {
        #[command(flatten)]
        target: TemplateTarget,

        /// One argument per variation; none removes the speech.
        variations: Vec<String>,
    },

    /// Replace the attachment list or add a new card.
    Attachments {
        #[command(flatten)]
        target: TemplateTarget,

        /// Card template names.
        names: Vec<String>,

        /// Create a new card template of this kind and attach it.
        #[arg(long)]
        add_card: Option<CardKind>,
    },

    /// Replace the suggested actions; none removes them.
    Actions {
        #[command(flatten)]
        target: TemplateTarget,

        actions: Vec<String>,
    },

    /// Set or clear the attachment layout (requires attachments).
    Layout {
        #[command(flatten)]
        target: TemplateTarget,

        /// `list` or `carousel`; omit to clear.
        layout: Option<AttachmentLayout>,
    },

    /// Set or clear the input hint (requires speech).
    Hint {
        #[command(flatten)]
        target: TemplateTarget,

        /// `accepting`, `ignoring` or `expecting`; omit to clear.
        hint: Option<InputHint>,
    },

    /// Close a modality and drop its content.
    Remove {
        #[command(flatten)]
        target: TemplateTarget,

        modality: ModalityKind,
    },
}

impl ResponseCommand {
    fn target(&self) -> &TemplateTarget {
        match self {
            ResponseCommand::Show { target }
            | ResponseCommand::Text { target, .. }
            | ResponseCommand::Speak { target, .. }
            | ResponseCommand::Attachments { target, .. }
            | ResponseCommand::Actions { target, .. }
            | ResponseCommand::Layout { target, .. }
            | ResponseCommand::Hint { target, .. }
            | ResponseCommand::Remove { target, .. } => target,
        }
    }
}

pub async fn run(state: &AppState, action: ResponseCommand, json: bool) -> Result<()> {
    let target = action.target().clone();
    let mut editor = state
        .editor(&target.project, &target.file, &target.template)
        .await
        .with_context(|| format!("cannot edit template '{}'", target.template))?;

    match action {
        ResponseCommand::Show { .. } => {}
        ResponseCommand::Text { variations, .. } => {
            set_variations(&mut editor, ModalityKind::Text, &variations).await?;
        }
        ResponseCommand::Speak { variations, .. } => {
            set_variations(&mut editor, ModalityKind::Speak, &variations).await?;
        }
        ResponseCommand::Attachments {
            names, add_card, ..
        } => {
            editor.add_modality(ModalityKind::Attachments).await?;
            if !names.is_empty() || add_card.is_none() {
                editor.set_attachments(&names).await?;
            }
            if let Some(card) = add_card {
                let name = editor.add_attachment_card(card).await?;
                if !json {
                    println!(
                        "  {} Created {} card '{}'",
                        style("✓").green().bold(),
                        card,
                        style(&name).bold()
                    );
                }
            }
        }
        ResponseCommand::Actions { actions, .. } => {
            editor.add_modality(ModalityKind::SuggestedActions).await?;
            editor.set_suggested_actions(&actions).await?;
        }
        ResponseCommand::Layout { layout, .. } => {
            editor.set_attachment_layout(layout).await?;
        }
        ResponseCommand::Hint { hint, .. } => {
            editor.set_input_hint(hint).await?;
        }
        ResponseCommand::Remove { modality, .. } => {
            editor.remove_modality(modality).await?;
        }
    }

    show(&editor, json).await
}

async fn set_variations(editor: &mut ConcreteEditor, kind: ModalityKind, items: &[String]) -> Result<()> {
    editor.add_modality(kind).await?;
    editor.set_variations(kind, items).await?;
    Ok(())
}

async fn show(editor: &ConcreteEditor, json: bool) -> Result<()> {
    let session = editor.state();

    let mut tabs = Vec::new();
    for kind in session.active_modalities() {
        tabs.push((*kind, editor.variations(*kind).await?));
    }

    if json {
        let variations: serde_json::Map<String, serde_json::Value> = tabs
            .iter()
            .map(|(kind, items)| (kind.to_string(), serde_json::json!(items)))
            .collect();
        let out = serde_json::json!({
            "template": session.template_id(),
            "file": editor.file_id(),
            "modalities": session.active_modalities(),
            "selected": session.selected(),
            "variations": variations,
            "response": session.response(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} {}",
        style("⚡").bold(),
        style(session.template_id()).cyan().bold(),
        style(format!("({})", editor.file_id())).dim()
    );
    for (kind, items) in &tabs {
        let marker = if *kind == session.selected() { "▸" } else { " " };
        println!();
        println!("  {marker} {}", style(kind).bold());
        if items.is_empty() {
            println!("      {}", style("(empty)").dim());
        }
        for item in items {
            println!("      - {item}");
        }
    }

    let response = session.response();
    if let Some(layout) = response.attachment_layout() {
        println!();
        println!("  {} {layout}", style("Attachment layout:").dim());
    }
    if let Some(hint) = response.input_hint() {
        println!();
        println!("  {} {hint}", style("Input hint:").dim());
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> ResponseCommand {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Response { action } => action,
            _ => panic!("not a response command"),
        }
    }

    #[test]
    fn test_text_variations_parse() {
        let action = parse(&[
            "composer", "response", "text", "-p", "bot", "-f", "main.en-us", "-t", "bfdactivity-1",
            "Hello", "Hi there",
        ]);
        match action {
            ResponseCommand::Text { target, variations } => {
                assert_eq!(target.project, "bot");
                assert_eq!(target.file, "main.en-us");
                assert_eq!(target.template, "bfdactivity-1");
                assert_eq!(variations, ["Hello", "Hi there"]);
            }
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn test_attachment_card_and_layout_values() {
        let action = parse(&[
            "composer", "response", "attachments", "-p", "bot", "-f", "main.en-us", "-t", "a",
            "--add-card", "hero",
        ]);
        assert!(matches!(
            action,
            ResponseCommand::Attachments { add_card: Some(CardKind::Hero), ref names, .. } if names.is_empty()
        ));

        let action = parse(&[
            "composer", "response", "layout", "-p", "bot", "-f", "main.en-us", "-t", "a", "carousel",
        ]);
        assert!(matches!(
            action,
            ResponseCommand::Layout { layout: Some(AttachmentLayout::Carousel), .. }
        ));
    }

    #[test]
    fn test_remove_accepts_any_case() {
        let action = parse(&[
            "composer", "response", "remove", "-p", "bot", "-f", "main.en-us", "-t", "a", "speak",
        ]);
        assert!(matches!(
            action,
            ResponseCommand::Remove { modality: ModalityKind::Speak, .. }
        ));
    }

    #[test]
    fn test_invalid_hint_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "composer", "response", "hint", "-p", "bot", "-f", "main.en-us", "-t", "a", "loud",
            ])
            .is_err()
        );
    }
}
