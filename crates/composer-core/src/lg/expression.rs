//! Template reference detection.
//!
//! A value denotes an indirection when it contains an interpolation of the
//! form `${<name-and-args>}` anywhere inside it. The text between the braces
//! is the reference payload (e.g. `greeting()`).

use regex::Regex;
use std::sync::LazyLock;

static SUB_TEMPLATE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(.*)\}").expect("Invalid template reference regex"));

/// Whether `value` contains a `${...}` interpolation.
pub fn is_template_reference(value: &str) -> bool {
    SUB_TEMPLATE_NAME_RE.is_match(value)
}

/// Extract the trimmed payload of the first `${...}` interpolation.
///
/// `${greeting()}` -> `greeting()`; plain text -> `None`.
pub fn extract_template_name(expression: &str) -> Option<String> {
    SUB_TEMPLATE_NAME_RE
        .captures(expression)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Like [`extract_template_name`] but drops the argument list:
/// `${card_1(user)}` -> `card_1`.
pub fn extract_template_id(expression: &str) -> Option<String> {
    let payload = extract_template_name(expression)?;
    let id = match payload.split_once('(') {
        Some((name, _)) => name.trim(),
        None => payload.as_str(),
    };
    (!id.is_empty()).then(|| id.to_string())
}
