//! Write-through editor over a template store.
//!
//! `ResponseEditor` owns one [`EditorState`] and applies each transition's
//! template effects to the store before committing the new state, so a failed
//! write leaves the session where it was. Edits are `&mut self`: one at a
//! time per session.

use composer_types::error::EditorError;
use composer_types::modality::{AttachmentLayout, InputHint, ModalityKind};
use composer_types::response::StructuredResponse;

use super::cards::CardKind;
use super::session::{EditorState, TemplateEffect, Transition};
use crate::lg::codec::structured_response_from_template;
use crate::lg::validate::validate_structured_response;
use crate::repository::template::TemplateStore;
use crate::service::id::IdGenerator;

pub struct ResponseEditor<T: TemplateStore, I: IdGenerator> {
    store: T,
    ids: I,
    file_id: String,
    state: EditorState,
}

impl<T: TemplateStore, I: IdGenerator> ResponseEditor<T, I> {
    /// Open a session on `template_id` in `file_id`.
    ///
    /// A missing template opens as an empty response; the first edit creates
    /// it. Templates holding free-form text are refused.
    pub async fn open(
        store: T,
        ids: I,
        file_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Result<Self, EditorError> {
        let file_id = file_id.into();
        let template_id = template_id.into();

        let response = match store.get(&file_id, &template_id).await? {
            Some(template) => {
                if !validate_structured_response(&template) {
                    return Err(EditorError::NotStructured(template_id));
                }
                structured_response_from_template(&template)
            }
            None => None,
        };

        tracing::debug!(file = %file_id, template = %template_id, "editor opened");
        Ok(Self {
            store,
            ids,
            file_id,
            state: EditorState::new(template_id, response),
        })
    }

    /// Like [`open`](Self::open) but the template must already exist.
    pub async fn open_existing(
        store: T,
        ids: I,
        file_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Result<Self, EditorError> {
        let file_id = file_id.into();
        let template_id = template_id.into();
        if store.get(&file_id, &template_id).await?.is_none() {
            return Err(EditorError::TemplateNotFound(template_id));
        }
        Self::open(store, ids, file_id, template_id).await
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn response(&self) -> &StructuredResponse {
        self.state.response()
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Variations of `kind` as shown in its tab, reading the sub-template
    /// body when the slot references one.
    pub async fn variations(&self, kind: ModalityKind) -> Result<Vec<String>, EditorError> {
        let sub_body = match self.state.sub_template(kind) {
            Some(sub) => self
                .store
                .get(&self.file_id, sub)
                .await?
                .map(|template| template.body),
            None => None,
        };
        Ok(self.state.variations(kind, sub_body.as_deref()))
    }

    pub async fn add_modality(&mut self, kind: ModalityKind) -> Result<(), EditorError> {
        let transition = self.state.add_modality(kind)?;
        self.apply(transition).await
    }

    pub async fn remove_modality(&mut self, kind: ModalityKind) -> Result<(), EditorError> {
        let transition = self.state.remove_modality(kind)?;
        self.apply(transition).await
    }

    pub async fn select_modality(&mut self, kind: ModalityKind) -> Result<(), EditorError> {
        let transition = self.state.select_modality(kind)?;
        self.apply(transition).await
    }

    pub async fn update_modality(&mut self, partial: &StructuredResponse) -> Result<(), EditorError> {
        let transition = self.state.update_modality(partial);
        self.apply(transition).await
    }

    pub async fn set_variations(
        &mut self,
        kind: ModalityKind,
        items: &[String],
    ) -> Result<(), EditorError> {
        let transition = self.state.set_variations(kind, items)?;
        self.apply(transition).await
    }

    pub async fn set_attachments(&mut self, names: &[String]) -> Result<(), EditorError> {
        let transition = self.state.set_attachments(names)?;
        self.apply(transition).await
    }

    /// Create a new card template and attach it. Returns the card's name.
    pub async fn add_attachment_card(&mut self, card: CardKind) -> Result<String, EditorError> {
        let id = self.ids.next();
        let transition = self.state.add_attachment_card(card, &id)?;
        self.apply(transition).await?;
        Ok(format!("{}_attachment_{}", self.state.template_id(), id))
    }

    pub async fn set_suggested_actions(&mut self, actions: &[String]) -> Result<(), EditorError> {
        let transition = self.state.set_suggested_actions(actions)?;
        self.apply(transition).await
    }

    pub async fn set_attachment_layout(
        &mut self,
        layout: Option<AttachmentLayout>,
    ) -> Result<(), EditorError> {
        let transition = self.state.set_attachment_layout(layout)?;
        self.apply(transition).await
    }

    pub async fn set_input_hint(&mut self, hint: Option<InputHint>) -> Result<(), EditorError> {
        let transition = self.state.set_input_hint(hint)?;
        self.apply(transition).await
    }

    async fn apply(&mut self, transition: Transition) -> Result<(), EditorError> {
        for effect in &transition.effects {
            match effect {
                TemplateEffect::Set { template_id, body } => {
                    self.store.set(&self.file_id, template_id, body).await?;
                }
                TemplateEffect::Delete { template_id } => {
                    self.store.delete(&self.file_id, template_id).await?;
                }
            }
        }
        self.state = transition.state;
        Ok(())
    }
}
