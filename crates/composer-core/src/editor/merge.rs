//! Partial-response merging.
//!
//! Rule: every slot present in the partial response replaces the slot of the
//! same kind wholesale (variation lists are never concatenated element-wise);
//! kinds absent from the partial response are left untouched.

use composer_types::response::StructuredResponse;

pub fn merge_response(base: &StructuredResponse, partial: &StructuredResponse) -> StructuredResponse {
    let mut merged = base.clone();
    for slot in partial.slots() {
        merged.insert(slot.clone());
    }
    merged
}
