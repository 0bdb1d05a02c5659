use composer_types::template::{ACTIVITY_TEMPLATE_TYPE, LgTemplate};

use super::codec::{is_empty_body, structured_response_from_template};

/// Whether a template can be edited through the structured response editor.
///
/// Empty templates qualify (there is nothing to lose). Otherwise the body must
/// be an `Activity` block from which at least one modality can be recovered.
pub fn validate_structured_response(template: &LgTemplate) -> bool {
    if is_empty_body(&template.body) {
        return true;
    }

    if template.template_type() != Some(ACTIVITY_TEMPLATE_TYPE) {
        return false;
    }

    structured_response_from_template(template).is_some()
}
