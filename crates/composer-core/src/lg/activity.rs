//! Minimal structured-body grammar.
//!
//! The full LG grammar belongs to the runtime template engine. The editor only
//! needs enough of it to recover the property bag of bodies it wrote itself:
//!
//! ```text
//! [Activity
//!     Text = ${bfdactivity-123_text()}
//!     SuggestedActions = Yes | No
//! ]
//! ```
//!
//! - The header names the structure type and becomes `$type`.
//! - Each `Key = value` line becomes one property; ` | ` separates list items.
//! - `Attachments` and `SuggestedActions` are list-typed and always come out
//!   as arrays, even with a single item.
//! - The closing `]` is optional; anything after it is ignored.

use composer_types::modality::ModalityKind;
use composer_types::template::{PropertyBag, TYPE_PROPERTY};
use serde_json::Value;

/// Separator between list items on a property line.
pub const LIST_SEPARATOR: &str = " | ";

/// Indentation of property lines written by the serializer.
pub const PROPERTY_INDENT: &str = "    ";

/// Extract the property bag of a structured body.
///
/// Returns `None` when the body does not start with a `[Type` header, e.g.
/// plain `- variation` text bodies.
pub fn activity_properties(body: &str) -> Option<PropertyBag> {
    let mut lines = body.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next()?.strip_prefix('[')?.trim();
    if header.is_empty() || header.contains(char::is_whitespace) {
        return None;
    }

    let mut properties = PropertyBag::new();
    properties.insert(TYPE_PROPERTY.to_string(), Value::String(header.to_string()));

    for line in lines {
        if line == "]" {
            break;
        }
        let Some((key, value)) = line.split_once('=') else {
            tracing::debug!(line, "skipping structured body line without '='");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        properties.insert(key.to_string(), property_value(key, value.trim()));
    }

    Some(properties)
}

fn property_value(key: &str, raw: &str) -> Value {
    let list_typed = key == ModalityKind::Attachments.as_str()
        || key == ModalityKind::SuggestedActions.as_str();

    // A bare '|' is value text; only the spaced separator splits items.
    if raw.contains(LIST_SEPARATOR) || list_typed {
        let items: Vec<Value> = raw
            .split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect();
        if list_typed || items.len() > 1 {
            return Value::Array(items);
        }
    }

    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_type_and_properties() {
        let body = "[Activity\n    Text = Hello there\n    InputHint = expecting\n]";
        let props = activity_properties(body).unwrap();
        assert_eq!(props["$type"], json!("Activity"));
        assert_eq!(props["Text"], json!("Hello there"));
        assert_eq!(props["InputHint"], json!("expecting"));
    }

    #[test]
    fn test_pipe_separated_values_become_arrays() {
        let body = "[Activity\n    Text = Hi | Hello | Hey\n]";
        let props = activity_properties(body).unwrap();
        assert_eq!(props["Text"], json!(["Hi", "Hello", "Hey"]));
    }

    #[test]
    fn test_bare_pipe_is_not_a_separator() {
        let body = "[Activity\n    Text = Choose A|B\n    SuggestedActions = Yes|No | Maybe\n]";
        let props = activity_properties(body).unwrap();
        assert_eq!(props["Text"], json!("Choose A|B"));
        assert_eq!(props["SuggestedActions"], json!(["Yes|No", "Maybe"]));
    }

    #[test]
    fn test_list_typed_keys_are_always_arrays() {
        let body = "[Activity\n    Attachments = ${card()}\n    SuggestedActions = Yes\n]";
        let props = activity_properties(body).unwrap();
        assert_eq!(props["Attachments"], json!(["${card()}"]));
        assert_eq!(props["SuggestedActions"], json!(["Yes"]));
    }

    #[test]
    fn test_plain_text_body_is_not_structured() {
        assert!(activity_properties("- Hello\n- Hi").is_none());
        assert!(activity_properties("").is_none());
        assert!(activity_properties("[ ]").is_none());
    }

    #[test]
    fn test_tolerates_missing_close_and_junk_lines() {
        let body = "[HeroCard\n  title = Welcome\n  this line has no equals\n";
        let props = activity_properties(body).unwrap();
        assert_eq!(props["$type"], json!("HeroCard"));
        assert_eq!(props["title"], json!("Welcome"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_ignores_content_after_closing_bracket() {
        let body = "[Activity\n    Text = a\n]\n    Speak = b";
        let props = activity_properties(body).unwrap();
        assert!(props.get("Speak").is_none());
    }

    #[test]
    fn test_empty_value_is_kept_as_empty_string() {
        let body = "[HeroCard\n  title =\n]";
        let props = activity_properties(body).unwrap();
        assert_eq!(props["title"], json!(""));
    }
}
