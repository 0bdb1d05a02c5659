//! Binding a dialog field to a designer-generated template.
//!
//! A response field on a dialog action holds either literal text or a
//! `${bfd<type>-<designerId>()}` reference to the template the designer
//! created for it. These helpers decide which template a field edits, what
//! its body starts as, and what an edit does to the store and the field.

use composer_types::error::RepositoryError;
use composer_types::template::{LgMetaData, TemplateRef};

use crate::repository::template::TemplateStore;

/// Name of the template a field edits: the one it already references, or the
/// designer-generated name for this field.
pub fn field_template_name(field_value: Option<&str>, lg_type: &str, designer_id: &str) -> String {
    match field_value.and_then(TemplateRef::parse) {
        Some(reference) => reference.name,
        None => LgMetaData::new(lg_type, designer_id).to_string(),
    }
}

/// Body of a template that does not exist yet, seeded from the field value.
///
/// A field that already references a designer template of the same type
/// starts empty; literal text becomes a single `- ` variation.
pub fn initial_template_body(lg_type: &str, field_value: Option<&str>) -> String {
    let text = field_value.unwrap_or_default();

    let references_own_template = TemplateRef::parse(text)
        .and_then(|r| LgMetaData::parse(&r.name))
        .is_some_and(|meta| meta.lg_type == lg_type);
    if references_own_template {
        return String::new();
    }

    if text.starts_with('-') {
        text.to_string()
    } else {
        format!("- {text}")
    }
}

/// What an edit of the field's template body requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Write `body` to the template and point the field at it.
    Update {
        template_name: String,
        body: String,
        field_value: String,
    },
    /// Delete the template and clear the field.
    Remove { template_name: String },
}

pub fn field_change(template_name: &str, body: &str) -> FieldChange {
    if body.is_empty() {
        FieldChange::Remove {
            template_name: template_name.to_string(),
        }
    } else {
        FieldChange::Update {
            template_name: template_name.to_string(),
            body: body.to_string(),
            field_value: TemplateRef::new(template_name).to_string(),
        }
    }
}

/// Template a field edits and its current body.
///
/// The stored body wins; a template that does not exist yet is seeded from
/// the field value.
pub async fn field_template<T: TemplateStore>(
    store: &T,
    file_id: &str,
    lg_type: &str,
    designer_id: &str,
    field_value: Option<&str>,
) -> Result<(String, String), RepositoryError> {
    let name = field_template_name(field_value, lg_type, designer_id);
    let body = match store.get(file_id, &name).await? {
        Some(template) => template.body,
        None => initial_template_body(lg_type, field_value),
    };
    Ok((name, body))
}

/// Write a field edit to the store. Returns the new field value, `None` when
/// the field is cleared.
pub async fn apply_field_change<T: TemplateStore>(
    store: &T,
    file_id: &str,
    change: &FieldChange,
) -> Result<Option<String>, RepositoryError> {
    match change {
        FieldChange::Update {
            template_name,
            body,
            field_value,
        } => {
            store.set(file_id, template_name, body).await?;
            Ok(Some(field_value.clone()))
        }
        FieldChange::Remove { template_name } => {
            store.delete(file_id, template_name).await?;
            Ok(None)
        }
    }
}
