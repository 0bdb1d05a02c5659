//! Pure modality editing state machine.
//!
//! An [`EditorState`] holds the open tabs, the selected tab and the current
//! structured response of one template. Every edit is a transition taking
//! `&self` and returning the next state together with the template writes
//! ([`TemplateEffect`]s) the edit requires, in the order they must be applied.
//! Nothing here touches a store; see [`ResponseEditor`](super::ResponseEditor)
//! for the write-through wrapper.
//!
//! Variation-count policy for Text and Speak:
//!
//! | new count | slot                               | sub-template                |
//! |-----------|------------------------------------|-----------------------------|
//! | 0         | removed                            | deleted                     |
//! | 1         | `direct`, literal inlined          | body cleared, if one exists |
//! | 2+        | `template`, `${<sub>()}`           | one `- ` line per variation |
//!
//! The sub-template id is the one the slot already references, or
//! `{templateId}_{modality}` (`greeting_text`, `greeting_speak`).

use std::collections::BTreeMap;

use composer_types::error::EditorError;
use composer_types::modality::{
    AttachmentLayout, InputHint, ModalityKind, ModalitySlot, VariationSlot,
};
use composer_types::response::StructuredResponse;
use composer_types::template::TemplateRef;

use super::cards::CardKind;
use super::merge::merge_response;
use crate::lg::codec::serialize_structured_response;
use crate::lg::expression::{extract_template_id, is_template_reference};

/// A write against the template store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEffect {
    Set { template_id: String, body: String },
    Delete { template_id: String },
}

/// Result of one edit: the next state and the writes that go with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: EditorState,
    pub effects: Vec<TemplateEffect>,
}

impl Transition {
    fn unchanged(state: &EditorState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    template_id: String,
    /// Tab order; insertion order is meaningful.
    active: Vec<ModalityKind>,
    selected: ModalityKind,
    response: StructuredResponse,
    /// Sub-templates holding the variations of Text/Speak.
    sub_templates: BTreeMap<ModalityKind, String>,
}

impl EditorState {
    /// Open a session on `template_id` with its parsed response, if any.
    ///
    /// Tabs start as the editable kinds present in the response (canonical
    /// order), or just Text.
    pub fn new(template_id: impl Into<String>, response: Option<StructuredResponse>) -> Self {
        let response = response.unwrap_or_default();

        let mut active: Vec<ModalityKind> =
            response.kinds().filter(ModalityKind::is_tab).collect();
        if active.is_empty() {
            active.push(ModalityKind::Text);
        }

        let sub_templates = [ModalityKind::Text, ModalityKind::Speak]
            .into_iter()
            .filter_map(|kind| {
                let slot = response.variations(kind)?;
                if !slot.is_template() {
                    return None;
                }
                let reference = TemplateRef::parse(slot.value.first()?)?;
                Some((kind, reference.name))
            })
            .collect();

        Self {
            template_id: template_id.into(),
            selected: active[0],
            active,
            response,
            sub_templates,
        }
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn active_modalities(&self) -> &[ModalityKind] {
        &self.active
    }

    pub fn selected(&self) -> ModalityKind {
        self.selected
    }

    pub fn response(&self) -> &StructuredResponse {
        &self.response
    }

    pub fn is_active(&self, kind: ModalityKind) -> bool {
        self.active.contains(&kind)
    }

    /// Whether a tab may be removed; the last one never can.
    pub fn can_remove(&self) -> bool {
        self.active.len() > 1
    }

    /// Sub-template currently holding the variations of `kind`.
    pub fn sub_template(&self, kind: ModalityKind) -> Option<&str> {
        self.sub_templates.get(&kind).map(String::as_str)
    }

    /// Sub-template id that a multi-variation edit of `kind` writes to.
    pub fn sub_template_id(&self, kind: ModalityKind) -> String {
        self.sub_templates
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| format!("{}_{}", self.template_id, kind.as_str().to_lowercase()))
    }

    /// Variations shown in the editor for `kind`.
    ///
    /// `sub_body` is the body of the referenced sub-template, when the caller
    /// could load it; its `- ` lines win over the slot's inline values.
    pub fn variations(&self, kind: ModalityKind, sub_body: Option<&str>) -> Vec<String> {
        let Some(slot) = self.response.variations(kind) else {
            return Vec::new();
        };
        match sub_body.filter(|body| !body.trim().is_empty()) {
            Some(body) => body_variations(body),
            None => slot.value.clone(),
        }
    }

    /// Card template names referenced by the Attachments slot.
    pub fn attachment_names(&self) -> Vec<String> {
        self.response
            .variations(ModalityKind::Attachments)
            .map(|slot| {
                slot.value
                    .iter()
                    .filter_map(|value| extract_template_id(value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Open a tab and select it. Opening an open tab changes nothing.
    pub fn add_modality(&self, kind: ModalityKind) -> Result<Transition, EditorError> {
        if !kind.is_tab() {
            return Err(EditorError::NotEditable(kind));
        }
        if self.is_active(kind) {
            return Ok(Transition::unchanged(self));
        }

        let mut state = self.clone();
        state.active.push(kind);
        state.selected = kind;
        tracing::debug!(template = %self.template_id, modality = %kind, "modality added");
        Ok(Transition {
            state,
            effects: Vec::new(),
        })
    }

    /// Close a tab and drop its content.
    ///
    /// The slot and its side channel (InputHint for Speak, AttachmentLayout
    /// for Attachments) leave the response, the root template is rewritten
    /// and the modality's sub-template, if any, is deleted. Removing the last
    /// open tab changes nothing.
    pub fn remove_modality(&self, kind: ModalityKind) -> Result<Transition, EditorError> {
        if !self.is_active(kind) {
            return Err(EditorError::NotActive(kind));
        }
        if !self.can_remove() {
            tracing::debug!(template = %self.template_id, modality = %kind, "refusing to remove last modality");
            return Ok(Transition::unchanged(self));
        }

        let mut state = self.clone();
        state.active.retain(|k| *k != kind);
        if state.selected == kind {
            state.selected = state.active[0];
        }
        state.response.remove(kind);
        if let Some(side) = kind.side_channel() {
            state.response.remove(side);
        }

        let mut effects = vec![state.root_effect()];
        if let Some(sub) = state.sub_templates.remove(&kind) {
            effects.push(TemplateEffect::Delete { template_id: sub });
        }

        tracing::debug!(template = %self.template_id, modality = %kind, "modality removed");
        Ok(Transition { state, effects })
    }

    pub fn select_modality(&self, kind: ModalityKind) -> Result<Transition, EditorError> {
        if !self.is_active(kind) {
            return Err(EditorError::NotActive(kind));
        }
        let mut state = self.clone();
        state.selected = kind;
        Ok(Transition {
            state,
            effects: Vec::new(),
        })
    }

    /// Merge `partial` into the response and rewrite the root template.
    pub fn update_modality(&self, partial: &StructuredResponse) -> Transition {
        let mut state = self.clone();
        state.response = merge_response(&self.response, partial);
        Transition {
            effects: vec![state.root_effect()],
            state,
        }
    }

    /// Replace the variations of an open Text, Speak or Attachments tab.
    ///
    /// Attachments are always a direct list of card references, so for that
    /// kind this is [`set_attachments`](Self::set_attachments).
    pub fn set_variations(
        &self,
        kind: ModalityKind,
        items: &[String],
    ) -> Result<Transition, EditorError> {
        match kind {
            ModalityKind::Text | ModalityKind::Speak => {}
            ModalityKind::Attachments => return self.set_attachments(items),
            other => return Err(EditorError::NotEditable(other)),
        }
        self.require_active(kind)?;

        let mut state = self.clone();
        let effects = match items {
            [] => {
                let sub = state
                    .sub_templates
                    .remove(&kind)
                    .unwrap_or_else(|| self.sub_template_id(kind));
                state.response.remove(kind);
                vec![
                    state.root_effect(),
                    TemplateEffect::Delete { template_id: sub },
                ]
            }
            [single] => {
                state.response.insert(variation_slot(
                    kind,
                    VariationSlot::direct(vec![single.clone()]),
                ));
                let mut effects = vec![state.root_effect()];
                if let Some(sub) = state.sub_templates.get(&kind) {
                    effects.push(TemplateEffect::Set {
                        template_id: sub.clone(),
                        body: String::new(),
                    });
                }
                effects
            }
            many => {
                let sub = self.sub_template_id(kind);
                state.response.insert(variation_slot(
                    kind,
                    VariationSlot::template(TemplateRef::new(&sub).to_string()),
                ));
                state.sub_templates.insert(kind, sub.clone());
                vec![
                    TemplateEffect::Set {
                        template_id: sub,
                        body: variations_body(many),
                    },
                    state.root_effect(),
                ]
            }
        };

        tracing::debug!(
            template = %self.template_id,
            modality = %kind,
            count = items.len(),
            "variations updated"
        );
        Ok(Transition { state, effects })
    }

    /// Replace the attachment list with references to the named card
    /// templates. Entries that already are expressions are kept as they are.
    pub fn set_attachments(&self, names: &[String]) -> Result<Transition, EditorError> {
        self.require_active(ModalityKind::Attachments)?;

        let mut state = self.clone();
        if names.is_empty() {
            state.response.remove(ModalityKind::Attachments);
        } else {
            let value = names.iter().map(|name| attachment_reference(name)).collect();
            state
                .response
                .insert(ModalitySlot::Attachments(VariationSlot::direct(value)));
        }
        Ok(Transition {
            effects: vec![state.root_effect()],
            state,
        })
    }

    /// Create a `{templateId}_attachment_{id}` card template of the given
    /// kind and append a reference to it.
    pub fn add_attachment_card(&self, card: CardKind, id: &str) -> Result<Transition, EditorError> {
        let card_template = format!("{}_attachment_{}", self.template_id, id);

        let mut names = self.attachment_names();
        names.push(card_template.clone());
        let mut transition = self.set_attachments(&names)?;

        transition.effects.insert(
            0,
            TemplateEffect::Set {
                template_id: card_template,
                body: card.skeleton(),
            },
        );
        Ok(transition)
    }

    /// Replace the suggested actions; an empty list removes the slot.
    pub fn set_suggested_actions(&self, actions: &[String]) -> Result<Transition, EditorError> {
        self.require_active(ModalityKind::SuggestedActions)?;

        let mut state = self.clone();
        if actions.is_empty() {
            state.response.remove(ModalityKind::SuggestedActions);
        } else {
            state.response.insert(ModalitySlot::SuggestedActions {
                value: actions.to_vec(),
            });
        }
        Ok(Transition {
            effects: vec![state.root_effect()],
            state,
        })
    }

    /// Set or clear the attachment layout. Requires the Attachments tab.
    pub fn set_attachment_layout(
        &self,
        layout: Option<AttachmentLayout>,
    ) -> Result<Transition, EditorError> {
        self.require_active(ModalityKind::Attachments)?;
        Ok(self.set_side_channel(
            ModalityKind::AttachmentLayout,
            layout.map(|value| ModalitySlot::AttachmentLayout { value }),
        ))
    }

    /// Set or clear the input hint. Requires the Speak tab.
    pub fn set_input_hint(&self, hint: Option<InputHint>) -> Result<Transition, EditorError> {
        self.require_active(ModalityKind::Speak)?;
        Ok(self.set_side_channel(
            ModalityKind::InputHint,
            hint.map(|value| ModalitySlot::InputHint { value }),
        ))
    }

    fn set_side_channel(&self, kind: ModalityKind, slot: Option<ModalitySlot>) -> Transition {
        let mut state = self.clone();
        match slot {
            Some(slot) => {
                state.response.insert(slot);
            }
            None => {
                state.response.remove(kind);
            }
        }
        Transition {
            effects: vec![state.root_effect()],
            state,
        }
    }

    fn require_active(&self, kind: ModalityKind) -> Result<(), EditorError> {
        if self.is_active(kind) {
            Ok(())
        } else {
            Err(EditorError::NotActive(kind))
        }
    }

    fn root_effect(&self) -> TemplateEffect {
        TemplateEffect::Set {
            template_id: self.template_id.clone(),
            body: serialize_structured_response(&self.response),
        }
    }
}

fn variation_slot(kind: ModalityKind, slot: VariationSlot) -> ModalitySlot {
    match kind {
        ModalityKind::Speak => ModalitySlot::Speak(slot),
        ModalityKind::Attachments => ModalitySlot::Attachments(slot),
        _ => ModalitySlot::Text(slot),
    }
}

fn attachment_reference(name: &str) -> String {
    if is_template_reference(name) {
        name.to_string()
    } else {
        TemplateRef::new(name).to_string()
    }
}

/// `- a\n- b` for `[a, b]`.
fn variations_body(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn body_variations(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix('-').map(str::trim_start).unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use composer_types::modality::ValueType;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn root_body(effects: &[TemplateEffect], template_id: &str) -> String {
        effects
            .iter()
            .find_map(|e| match e {
                TemplateEffect::Set { template_id: id, body } if id == template_id => {
                    Some(body.clone())
                }
                _ => None,
            })
            .unwrap()
    }

    fn deletes(effects: &[TemplateEffect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                TemplateEffect::Delete { template_id } => Some(template_id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_session_defaults_to_text() {
        let state = EditorState::new("greeting", None);
        assert_eq!(state.active_modalities(), [ModalityKind::Text]);
        assert_eq!(state.selected(), ModalityKind::Text);
        assert!(state.response().is_empty());
    }

    #[test]
    fn test_new_session_tabs_follow_response() {
        let response = StructuredResponse::new()
            .with(ModalitySlot::SuggestedActions {
                value: strings(&["Yes"]),
            })
            .with(ModalitySlot::Speak(VariationSlot::template("${greeting_speak()}")))
            .with(ModalitySlot::InputHint {
                value: InputHint::Expecting,
            });
        let state = EditorState::new("greeting", Some(response));
        assert_eq!(
            state.active_modalities(),
            [ModalityKind::Speak, ModalityKind::SuggestedActions]
        );
        assert_eq!(state.selected(), ModalityKind::Speak);
        assert_eq!(state.sub_template(ModalityKind::Speak), Some("greeting_speak"));
    }

    #[test]
    fn test_inline_expression_is_not_a_sub_template() {
        let response = StructuredResponse::new()
            .with(ModalitySlot::Text(VariationSlot::template("Hi ${user.name}")));
        let state = EditorState::new("greeting", Some(response));
        assert_eq!(state.sub_template(ModalityKind::Text), None);
    }

    #[test]
    fn test_add_modality_appends_and_selects() {
        let state = EditorState::new("greeting", None);
        let next = state.add_modality(ModalityKind::Speak).unwrap();
        assert_eq!(
            next.state.active_modalities(),
            [ModalityKind::Text, ModalityKind::Speak]
        );
        assert_eq!(next.state.selected(), ModalityKind::Speak);
        assert!(next.effects.is_empty());

        let again = next.state.add_modality(ModalityKind::Speak).unwrap();
        assert_eq!(again.state, next.state);
    }

    #[test]
    fn test_side_channels_are_not_tabs() {
        let state = EditorState::new("greeting", None);
        assert!(matches!(
            state.add_modality(ModalityKind::InputHint),
            Err(EditorError::NotEditable(ModalityKind::InputHint))
        ));
    }

    #[test]
    fn test_remove_last_modality_is_noop() {
        let state = EditorState::new("greeting", None);
        let next = state.remove_modality(ModalityKind::Text).unwrap();
        assert_eq!(next.state, state);
        assert!(next.effects.is_empty());
    }

    #[test]
    fn test_remove_inactive_modality_is_rejected() {
        let state = EditorState::new("greeting", None);
        assert!(matches!(
            state.remove_modality(ModalityKind::Speak),
            Err(EditorError::NotActive(ModalityKind::Speak))
        ));
    }

    #[test]
    fn test_remove_modality_drops_slot_side_channel_and_sub_template() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::Speak)
            .unwrap()
            .state;
        let state = state
            .set_variations(ModalityKind::Speak, &strings(&["Hi", "Hey"]))
            .unwrap()
            .state;
        let state = state
            .set_input_hint(Some(InputHint::Expecting))
            .unwrap()
            .state;
        let state = state
            .set_variations(ModalityKind::Text, &strings(&["Hello"]))
            .unwrap()
            .state;

        let next = state.remove_modality(ModalityKind::Speak).unwrap();
        assert_eq!(next.state.active_modalities(), [ModalityKind::Text]);
        assert_eq!(next.state.selected(), ModalityKind::Text);
        assert!(!next.state.response().contains(ModalityKind::Speak));
        assert!(!next.state.response().contains(ModalityKind::InputHint));
        assert_eq!(deletes(&next.effects), ["greeting_speak"]);
        assert_eq!(
            root_body(&next.effects, "greeting"),
            "[Activity\n    Text = Hello\n]"
        );
    }

    #[test]
    fn test_remove_unselected_keeps_selection() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::Speak)
            .unwrap()
            .state
            .add_modality(ModalityKind::SuggestedActions)
            .unwrap()
            .state;
        let next = state.remove_modality(ModalityKind::Speak).unwrap();
        assert_eq!(next.state.selected(), ModalityKind::SuggestedActions);
    }

    #[test]
    fn test_select_modality() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::Speak)
            .unwrap()
            .state;
        let next = state.select_modality(ModalityKind::Text).unwrap();
        assert_eq!(next.state.selected(), ModalityKind::Text);
        assert!(state.select_modality(ModalityKind::Attachments).is_err());
    }

    #[test]
    fn test_single_variation_is_direct() {
        let state = EditorState::new("greeting", None);
        let next = state
            .set_variations(ModalityKind::Text, &strings(&["Hello"]))
            .unwrap();
        let slot = next.state.response().variations(ModalityKind::Text).unwrap();
        assert_eq!(slot, &VariationSlot::direct(strings(&["Hello"])));
        assert_eq!(next.effects.len(), 1);
    }

    #[test]
    fn test_two_variations_use_sub_template() {
        let state = EditorState::new("greeting", None);
        let next = state
            .set_variations(ModalityKind::Text, &strings(&["Hi", "Hey"]))
            .unwrap();

        let slot = next.state.response().variations(ModalityKind::Text).unwrap();
        assert_eq!(slot.value_type, ValueType::Template);
        assert_eq!(slot.value, strings(&["${greeting_text()}"]));
        assert_eq!(
            next.effects,
            vec![
                TemplateEffect::Set {
                    template_id: "greeting_text".to_string(),
                    body: "- Hi\n- Hey".to_string(),
                },
                TemplateEffect::Set {
                    template_id: "greeting".to_string(),
                    body: "[Activity\n    Text = ${greeting_text()}\n]".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_collapse_from_two_to_one_clears_sub_template() {
        let state = EditorState::new("greeting", None)
            .set_variations(ModalityKind::Text, &strings(&["Hi", "Hey"]))
            .unwrap()
            .state;
        let next = state
            .set_variations(ModalityKind::Text, &strings(&["Hi"]))
            .unwrap();

        let slot = next.state.response().variations(ModalityKind::Text).unwrap();
        assert_eq!(slot.value_type, ValueType::Direct);
        assert!(next.effects.contains(&TemplateEffect::Set {
            template_id: "greeting_text".to_string(),
            body: String::new(),
        }));
    }

    #[test]
    fn test_zero_variations_remove_slot_and_delete_once() {
        let state = EditorState::new("greeting", None)
            .set_variations(ModalityKind::Text, &strings(&["Hi", "Hey"]))
            .unwrap()
            .state;
        let next = state.set_variations(ModalityKind::Text, &[]).unwrap();
        assert!(!next.state.response().contains(ModalityKind::Text));
        assert_eq!(deletes(&next.effects), ["greeting_text"]);
        assert_eq!(next.state.sub_template(ModalityKind::Text), None);
    }

    #[test]
    fn test_existing_sub_template_id_is_reused() {
        let response = StructuredResponse::new()
            .with(ModalitySlot::Speak(VariationSlot::template("${custom_speech()}")));
        let state = EditorState::new("greeting", Some(response));
        let next = state
            .set_variations(ModalityKind::Speak, &strings(&["a", "b", "c"]))
            .unwrap();
        assert!(matches!(
            &next.effects[0],
            TemplateEffect::Set { template_id, body } if template_id == "custom_speech" && body == "- a\n- b\n- c"
        ));
    }

    #[test]
    fn test_set_variations_requires_active_tab() {
        let state = EditorState::new("greeting", None);
        assert!(matches!(
            state.set_variations(ModalityKind::Speak, &strings(&["Hi"])),
            Err(EditorError::NotActive(ModalityKind::Speak))
        ));
        assert!(matches!(
            state.set_variations(ModalityKind::SuggestedActions, &strings(&["Hi"])),
            Err(EditorError::NotEditable(ModalityKind::SuggestedActions))
        ));
    }

    #[test]
    fn test_variations_prefer_sub_template_body() {
        let response = StructuredResponse::new()
            .with(ModalitySlot::Text(VariationSlot::template("${greeting_text()}")));
        let state = EditorState::new("greeting", Some(response));
        assert_eq!(
            state.variations(ModalityKind::Text, Some("- Hi\n- Hey\n")),
            strings(&["Hi", "Hey"])
        );
        assert_eq!(
            state.variations(ModalityKind::Text, None),
            strings(&["${greeting_text()}"])
        );
        assert!(state.variations(ModalityKind::Speak, Some("- x")).is_empty());
    }

    #[test]
    fn test_attachments_are_direct_references() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::Attachments)
            .unwrap()
            .state;
        let next = state
            .set_variations(ModalityKind::Attachments, &strings(&["welcome_card", "${menu_card()}"]))
            .unwrap();
        let slot = next
            .state
            .response()
            .variations(ModalityKind::Attachments)
            .unwrap();
        assert_eq!(slot.value_type, ValueType::Direct);
        assert_eq!(slot.value, strings(&["${welcome_card()}", "${menu_card()}"]));
        assert_eq!(
            next.state.attachment_names(),
            strings(&["welcome_card", "menu_card"])
        );
        assert!(deletes(&next.effects).is_empty());
    }

    #[test]
    fn test_add_attachment_card_creates_template_first() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::Attachments)
            .unwrap()
            .state;
        let next = state.add_attachment_card(CardKind::Hero, "42").unwrap();

        assert_eq!(
            next.effects[0],
            TemplateEffect::Set {
                template_id: "greeting_attachment_42".to_string(),
                body: CardKind::Hero.skeleton(),
            }
        );
        assert_eq!(
            root_body(&next.effects, "greeting"),
            "[Activity\n    Attachments = ${greeting_attachment_42()}\n]"
        );
    }

    #[test]
    fn test_remove_attachments_clears_layout() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::Attachments)
            .unwrap()
            .state
            .set_attachments(&strings(&["card"]))
            .unwrap()
            .state
            .set_attachment_layout(Some(AttachmentLayout::Carousel))
            .unwrap()
            .state;
        assert_eq!(state.response().attachment_layout(), Some(AttachmentLayout::Carousel));

        let next = state.remove_modality(ModalityKind::Attachments).unwrap();
        assert!(!next.state.response().contains(ModalityKind::AttachmentLayout));
        assert!(deletes(&next.effects).is_empty());
    }

    #[test]
    fn test_side_channels_require_their_tab() {
        let state = EditorState::new("greeting", None);
        assert!(state.set_input_hint(Some(InputHint::Accepting)).is_err());
        assert!(state.set_attachment_layout(Some(AttachmentLayout::List)).is_err());
    }

    #[test]
    fn test_input_hint_set_and_unset() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::Speak)
            .unwrap()
            .state;
        let set = state.set_input_hint(Some(InputHint::Ignoring)).unwrap();
        assert_eq!(set.state.response().input_hint(), Some(InputHint::Ignoring));
        let unset = set.state.set_input_hint(None).unwrap();
        assert_eq!(unset.state.response().input_hint(), None);
    }

    #[test]
    fn test_suggested_actions_replace_and_clear() {
        let state = EditorState::new("greeting", None)
            .add_modality(ModalityKind::SuggestedActions)
            .unwrap()
            .state;
        let next = state
            .set_suggested_actions(&strings(&["Yes", "No"]))
            .unwrap();
        assert_eq!(
            root_body(&next.effects, "greeting"),
            "[Activity\n    SuggestedActions = Yes | No\n]"
        );
        let cleared = next.state.set_suggested_actions(&[]).unwrap();
        assert!(cleared.state.response().is_empty());
    }

    #[test]
    fn test_update_modality_merges_and_writes_root() {
        let state = EditorState::new("greeting", None)
            .set_variations(ModalityKind::Text, &strings(&["Hi"]))
            .unwrap()
            .state;
        let partial = StructuredResponse::new().with(ModalitySlot::SuggestedActions {
            value: strings(&["Help"]),
        });
        let next = state.update_modality(&partial);
        assert_eq!(next.state.response().len(), 2);
        assert_eq!(
            next.effects,
            vec![TemplateEffect::Set {
                template_id: "greeting".to_string(),
                body: "[Activity\n    Text = Hi\n    SuggestedActions = Help\n]".to_string(),
            }]
        );
    }
}
