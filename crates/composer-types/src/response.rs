//! Structured response: a sparse record of modality slots.
//!
//! `StructuredResponse` maps each [`ModalityKind`] to at most one
//! [`ModalitySlot`]. Unspecified modalities are absent keys, never
//! null-valued entries. The slot stored under a key always has that key's
//! kind -- [`StructuredResponse::insert`] derives the key from the slot, and
//! deserialization rejects mismatched pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::modality::{AttachmentLayout, InputHint, ModalityKind, ModalitySlot, VariationSlot};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<ModalityKind, ModalitySlot>")]
pub struct StructuredResponse {
    slots: BTreeMap<ModalityKind, ModalitySlot>,
}

impl StructuredResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a slot under its own kind, returning the slot it replaced.
    pub fn insert(&mut self, slot: ModalitySlot) -> Option<ModalitySlot> {
        self.slots.insert(slot.kind(), slot)
    }

    /// Builder-style insert.
    pub fn with(mut self, slot: ModalitySlot) -> Self {
        self.insert(slot);
        self
    }

    pub fn get(&self, kind: ModalityKind) -> Option<&ModalitySlot> {
        self.slots.get(&kind)
    }

    pub fn remove(&mut self, kind: ModalityKind) -> Option<ModalitySlot> {
        self.slots.remove(&kind)
    }

    pub fn contains(&self, kind: ModalityKind) -> bool {
        self.slots.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Present kinds, canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = ModalityKind> + '_ {
        self.slots.keys().copied()
    }

    /// Present slots, canonical order.
    pub fn slots(&self) -> impl Iterator<Item = &ModalitySlot> {
        self.slots.values()
    }

    /// Variation slot for Text, Speak or Attachments.
    pub fn variations(&self, kind: ModalityKind) -> Option<&VariationSlot> {
        self.get(kind).and_then(ModalitySlot::as_variation)
    }

    pub fn attachment_layout(&self) -> Option<AttachmentLayout> {
        match self.get(ModalityKind::AttachmentLayout) {
            Some(ModalitySlot::AttachmentLayout { value }) => Some(*value),
            _ => None,
        }
    }

    pub fn input_hint(&self) -> Option<InputHint> {
        match self.get(ModalityKind::InputHint) {
            Some(ModalitySlot::InputHint { value }) => Some(*value),
            _ => None,
        }
    }

    pub fn suggested_actions(&self) -> Option<&[String]> {
        match self.get(ModalityKind::SuggestedActions) {
            Some(ModalitySlot::SuggestedActions { value }) => Some(value),
            _ => None,
        }
    }
}

impl Serialize for StructuredResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.slots.serialize(serializer)
    }
}

impl TryFrom<BTreeMap<ModalityKind, ModalitySlot>> for StructuredResponse {
    type Error = String;

    fn try_from(slots: BTreeMap<ModalityKind, ModalitySlot>) -> Result<Self, Self::Error> {
        if let Some((key, slot)) = slots.iter().find(|(key, slot)| slot.kind() != **key) {
            return Err(format!(
                "slot of kind '{}' stored under key '{key}'",
                slot.kind()
            ));
        }
        Ok(Self { slots })
    }
}

impl FromIterator<ModalitySlot> for StructuredResponse {
    fn from_iter<I: IntoIterator<Item = ModalitySlot>>(iter: I) -> Self {
        let mut response = Self::new();
        for slot in iter {
            response.insert(slot);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> ModalitySlot {
        ModalitySlot::Text(VariationSlot::direct(vec![value.to_string()]))
    }

    #[test]
    fn test_insert_keys_by_slot_kind() {
        let mut response = StructuredResponse::new();
        assert!(response.insert(text("a")).is_none());
        let replaced = response.insert(text("b"));
        assert_eq!(replaced, Some(text("a")));
        assert_eq!(response.len(), 1);
        assert_eq!(response.get(ModalityKind::Text), Some(&text("b")));
    }

    #[test]
    fn test_iteration_is_canonical() {
        let response: StructuredResponse = vec![
            ModalitySlot::SuggestedActions {
                value: vec!["yes".to_string()],
            },
            ModalitySlot::InputHint {
                value: InputHint::Expecting,
            },
            text("hello"),
        ]
        .into_iter()
        .collect();

        let kinds: Vec<_> = response.kinds().collect();
        assert_eq!(
            kinds,
            vec![
                ModalityKind::Text,
                ModalityKind::InputHint,
                ModalityKind::SuggestedActions
            ]
        );
    }

    #[test]
    fn test_json_roundtrip_uses_kind_keys() {
        let response = StructuredResponse::new()
            .with(text("hi"))
            .with(ModalitySlot::AttachmentLayout {
                value: AttachmentLayout::List,
            });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Text"]["value"][0], "hi");
        assert_eq!(json["AttachmentLayout"]["value"], "list");

        let back: StructuredResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_key() {
        let json = serde_json::json!({
            "Speak": { "kind": "Text", "value": ["x"], "valueType": "direct" }
        });
        assert!(serde_json::from_value::<StructuredResponse>(json).is_err());
    }

    #[test]
    fn test_typed_accessors() {
        let response = StructuredResponse::new()
            .with(ModalitySlot::InputHint {
                value: InputHint::Ignoring,
            })
            .with(ModalitySlot::SuggestedActions {
                value: vec!["a".to_string(), "b".to_string()],
            });

        assert_eq!(response.input_hint(), Some(InputHint::Ignoring));
        assert_eq!(response.attachment_layout(), None);
        assert_eq!(response.suggested_actions().unwrap().len(), 2);
        assert!(response.variations(ModalityKind::Text).is_none());
    }
}
