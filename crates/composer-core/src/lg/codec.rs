//! Structured response <-> template body conversion.
//!
//! Parsing reads the property bag the LG parser produced for a template and
//! turns each recognised property into a typed [`ModalitySlot`]. Unrecognised
//! shapes are dropped silently: a broken template must never take the editor
//! down with it.
//!
//! Serializing writes an `[Activity ...]` block with one `Kind = value` line
//! per non-empty slot, in canonical key order.

use composer_types::modality::{
    AttachmentLayout, InputHint, ModalityKind, ModalitySlot, ValueType, VariationSlot,
};
use composer_types::response::StructuredResponse;
use composer_types::template::{ACTIVITY_TEMPLATE_TYPE, LgTemplate, PropertyBag};
use serde_json::Value;

use super::activity::{LIST_SEPARATOR, PROPERTY_INDENT};
use super::expression::is_template_reference;

/// Result of interpreting a template body as a structured response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedBody {
    /// Blank body or a bare `-`: valid, but nothing to show yet.
    Empty,
    Structured(StructuredResponse),
    /// Not an Activity template, or no recognised property survived.
    NotStructured,
}

impl ParsedBody {
    pub fn into_response(self) -> Option<StructuredResponse> {
        match self {
            ParsedBody::Structured(response) => Some(response),
            _ => None,
        }
    }
}

/// Whether `body` is blank or a bare list-item dash.
pub fn is_empty_body(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.is_empty() || trimmed == "-"
}

/// Parse a template body and its property bag into a structured response.
pub fn parse_structured_response(
    body: &str,
    properties: &PropertyBag,
    template_type: Option<&str>,
) -> ParsedBody {
    if is_empty_body(body) {
        return ParsedBody::Empty;
    }

    if template_type != Some(ACTIVITY_TEMPLATE_TYPE) {
        return ParsedBody::NotStructured;
    }

    let response: StructuredResponse = ModalityKind::ALL
        .into_iter()
        .filter_map(|kind| properties.get(kind.as_str()).and_then(|v| slot_from_value(kind, v)))
        .collect();

    if response.is_empty() {
        ParsedBody::NotStructured
    } else {
        ParsedBody::Structured(response)
    }
}

/// Structured response of a template record, using its own `$type`.
pub fn structured_response_from_template(template: &LgTemplate) -> Option<StructuredResponse> {
    parse_structured_response(&template.body, &template.properties, template.template_type())
        .into_response()
}

fn slot_from_value(kind: ModalityKind, value: &Value) -> Option<ModalitySlot> {
    match kind {
        ModalityKind::Text | ModalityKind::Speak | ModalityKind::Attachments => {
            let slot = match value {
                Value::String(s) => VariationSlot {
                    value: vec![s.clone()],
                    value_type: if is_template_reference(s) {
                        ValueType::Template
                    } else {
                        ValueType::Direct
                    },
                },
                Value::Array(_) => VariationSlot::direct(string_array(value)?),
                _ => return None,
            };
            ModalitySlot::variation(kind, slot)
        }
        ModalityKind::SuggestedActions => match value {
            Value::Array(_) => Some(ModalitySlot::SuggestedActions {
                value: string_array(value)?,
            }),
            _ => None,
        },
        ModalityKind::AttachmentLayout => value
            .as_str()
            .and_then(|s| s.parse::<AttachmentLayout>().ok())
            .map(|value| ModalitySlot::AttachmentLayout { value }),
        ModalityKind::InputHint => value
            .as_str()
            .and_then(|s| s.parse::<InputHint>().ok())
            .map(|value| ModalitySlot::InputHint { value }),
    }
}

/// Array of strings, or `None` if any element is not a string.
fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Serialize a structured response into an `[Activity ...]` body.
pub fn serialize_structured_response(response: &StructuredResponse) -> String {
    let mut body = format!("[{ACTIVITY_TEMPLATE_TYPE}\n");
    for slot in response.slots() {
        if let Some(value) = slot_text(slot) {
            body.push_str(PROPERTY_INDENT);
            body.push_str(slot.kind().as_str());
            body.push_str(" = ");
            body.push_str(&value);
            body.push('\n');
        }
    }
    body.push(']');
    body
}

fn slot_text(slot: &ModalitySlot) -> Option<String> {
    if slot.is_empty() {
        return None;
    }
    let text = match slot {
        ModalitySlot::Text(v) | ModalitySlot::Speak(v) | ModalitySlot::Attachments(v) => {
            join_values(&v.value)
        }
        ModalitySlot::SuggestedActions { value } => join_values(value),
        ModalitySlot::AttachmentLayout { value } => value.as_str().to_string(),
        ModalitySlot::InputHint { value } => value.as_str().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Property lines are single-line, so embedded line breaks become spaces.
fn join_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| {
            if v.contains(['\r', '\n']) {
                tracing::debug!(value = %v, "line breaks in value written as spaces");
            }
            v.replace(['\r', '\n'], " ")
        })
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
