//! `composer field`: the template behind a dialog response field.

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use composer_core::lg::field::{apply_field_change, field_change, field_template};

use crate::state::AppState;

#[derive(Args)]
pub struct FieldArgs {
    /// Project id.
    #[arg(long, short)]
    pub project: String,

    /// LG file id, e.g. `main.en-us`.
    #[arg(long, short)]
    pub file: String,

    /// Field type, e.g. `activity` or `prompt`.
    #[arg(long = "type", default_value = "activity")]
    pub lg_type: String,

    /// Designer id of the dialog action owning the field.
    #[arg(long)]
    pub designer_id: String,

    /// Current field value (literal text or `${name()}`).
    #[arg(long)]
    pub value: Option<String>,

    /// New template body; an empty string removes the template. Omit to show
    /// the current body.
    #[arg(long)]
    pub body: Option<String>,
}

pub async fn run(state: &AppState, args: FieldArgs, json: bool) -> Result<()> {
    let store = state.workspace.templates(&args.project);
    let (template, body) = field_template(
        &store,
        &args.file,
        &args.lg_type,
        &args.designer_id,
        args.value.as_deref(),
    )
    .await
    .with_context(|| format!("failed to read field template in '{}'", args.file))?;

    let Some(new_body) = args.body else {
        if json {
            println!(
                "{}",
                serde_json::json!({ "template": template, "body": body })
            );
        } else {
            println!();
            println!("  {}", style(&template).cyan().bold());
            for line in body.lines() {
                println!("    {line}");
            }
            println!();
        }
        return Ok(());
    };

    let field_value = apply_field_change(&store, &args.file, &field_change(&template, &new_body))
        .await
        .with_context(|| format!("failed to write template '{template}'"))?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "template": template, "fieldValue": field_value })
        );
    } else {
        match field_value {
            Some(value) => println!(
                "  {} Field bound to {}",
                style("✓").green().bold(),
                style(value).bold()
            ),
            None => println!(
                "  {} Removed '{}'; field cleared",
                style("✓").green().bold(),
                style(&template).bold()
            ),
        }
    }
    Ok(())
}
