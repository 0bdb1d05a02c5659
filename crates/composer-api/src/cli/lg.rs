//! `composer lg`: structured template bodies as files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use composer_core::lg::activity::activity_properties;
use composer_core::lg::codec::{ParsedBody, parse_structured_response, serialize_structured_response};
use composer_core::lg::validate::validate_structured_response;
use composer_types::modality::ModalitySlot;
use composer_types::response::StructuredResponse;
use composer_types::template::LgTemplate;

#[derive(Subcommand)]
pub enum LgCommand {
    /// Parse a template body into the structured response model (JSON).
    Parse {
        /// File holding the template body.
        file: PathBuf,

        /// Override the structure type read from the body header.
        #[arg(long = "type")]
        template_type: Option<String>,
    },

    /// Serialize a structured response model (JSON) into template text.
    Render {
        /// File holding the JSON model.
        file: PathBuf,
    },

    /// Check whether a template body can be edited as a structured response.
    Validate {
        /// File holding the template body.
        file: PathBuf,
    },
}

pub async fn run(action: LgCommand, json: bool) -> Result<()> {
    match action {
        LgCommand::Parse {
            file,
            template_type,
        } => parse(&file, template_type.as_deref(), json).await,
        LgCommand::Render { file } => render(&file).await,
        LgCommand::Validate { file } => validate(&file, json).await,
    }
}

/// Template record for a body read from `path`, named after the file stem.
fn template_from_body(path: &Path, body: String) -> LgTemplate {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("template")
        .to_string();
    let properties = activity_properties(&body).unwrap_or_default();
    let mut template = LgTemplate::new(name, body);
    template.properties = properties;
    template
}

async fn read_template(path: &Path) -> Result<LgTemplate> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(template_from_body(path, body))
}

async fn parse(path: &Path, template_type: Option<&str>, json: bool) -> Result<()> {
    let template = read_template(path).await?;
    let template_type = template_type.or(template.template_type());

    let response = match parse_structured_response(&template.body, &template.properties, template_type) {
        ParsedBody::Structured(response) => response,
        ParsedBody::Empty => StructuredResponse::new(),
        ParsedBody::NotStructured => {
            bail!("{} is not a structured response", path.display())
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

async fn render(path: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let response: StructuredResponse = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a structured response model", path.display()))?;

    println!("{}", serialize_structured_response(&response));
    Ok(())
}

async fn validate(path: &Path, json: bool) -> Result<()> {
    let template = read_template(path).await?;
    let valid = validate_structured_response(&template);

    if json {
        println!(
            "{}",
            serde_json::json!({ "template": template.name, "valid": valid })
        );
    } else if valid {
        println!(
            "  {} '{}' is a structured response",
            style("✓").green().bold(),
            style(&template.name).bold()
        );
    } else {
        println!(
            "  {} '{}' is not a structured response",
            style("✗").red().bold(),
            style(&template.name).bold()
        );
    }
    Ok(())
}

/// One table row per slot, in canonical order.
pub fn print_response(response: &StructuredResponse) {
    if response.is_empty() {
        println!();
        println!("  {} Empty response", style("i").blue().bold());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Modality").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    for slot in response.slots() {
        table.add_row(vec![
            Cell::new(slot.kind().as_str()).fg(Color::Cyan),
            Cell::new(slot_summary(slot)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
}

fn slot_summary(slot: &ModalitySlot) -> String {
    match slot {
        ModalitySlot::Text(v) | ModalitySlot::Speak(v) | ModalitySlot::Attachments(v) => {
            v.value.join("\n")
        }
        ModalitySlot::AttachmentLayout { value } => value.to_string(),
        ModalitySlot::InputHint { value } => value.to_string(),
        ModalitySlot::SuggestedActions { value } => value.join(" | "),
    }
}
