//! Modality kinds and the typed slots a structured response is made of.
//!
//! A modality is one aspect of a bot reply (display text, spoken text,
//! attachments, suggested actions, delivery hints). Each kind has exactly one
//! slot shape; the slot enum is tagged by `kind` on the wire so the JSON form
//! matches what the authoring UI exchanges:
//!
//! ```json
//! { "kind": "Text", "value": ["Hi there"], "valueType": "direct" }
//! ```

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The six property keys recognised inside an `Activity` template.
///
/// Declaration order is the canonical key order. `Ord` follows it, so any
/// ordered collection keyed by `ModalityKind` iterates canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModalityKind {
    Text,
    Speak,
    Attachments,
    AttachmentLayout,
    InputHint,
    SuggestedActions,
}

impl ModalityKind {
    /// All kinds in canonical order.
    pub const ALL: [ModalityKind; 6] = [
        ModalityKind::Text,
        ModalityKind::Speak,
        ModalityKind::Attachments,
        ModalityKind::AttachmentLayout,
        ModalityKind::InputHint,
        ModalityKind::SuggestedActions,
    ];

    /// Kinds that get their own editor tab. `AttachmentLayout` and
    /// `InputHint` ride along with Attachments and Speak respectively.
    pub const TABS: [ModalityKind; 4] = [
        ModalityKind::Text,
        ModalityKind::Speak,
        ModalityKind::Attachments,
        ModalityKind::SuggestedActions,
    ];

    /// Property key as written in the template body.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalityKind::Text => "Text",
            ModalityKind::Speak => "Speak",
            ModalityKind::Attachments => "Attachments",
            ModalityKind::AttachmentLayout => "AttachmentLayout",
            ModalityKind::InputHint => "InputHint",
            ModalityKind::SuggestedActions => "SuggestedActions",
        }
    }

    pub fn is_tab(&self) -> bool {
        Self::TABS.contains(self)
    }

    /// Whether the kind holds string variations that may be moved into a
    /// sub-template (Text, Speak, Attachments).
    pub fn has_variations(&self) -> bool {
        matches!(
            self,
            ModalityKind::Text | ModalityKind::Speak | ModalityKind::Attachments
        )
    }

    /// The side-channel slot that belongs to this tab, if any.
    pub fn side_channel(&self) -> Option<ModalityKind> {
        match self {
            ModalityKind::Speak => Some(ModalityKind::InputHint),
            ModalityKind::Attachments => Some(ModalityKind::AttachmentLayout),
            _ => None,
        }
    }
}

impl fmt::Display for ModalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModalityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid modality: '{s}'"))
    }
}

/// How a variation slot stores its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `value` holds the literal variation(s) inline.
    Direct,
    /// `value` holds exactly one `${name()}` reference to a sub-template.
    Template,
}

/// Slot shape shared by Text, Speak and Attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationSlot {
    pub value: Vec<String>,
    #[serde(rename = "valueType")]
    pub value_type: ValueType,
}

impl VariationSlot {
    pub fn direct(value: Vec<String>) -> Self {
        Self {
            value,
            value_type: ValueType::Direct,
        }
    }

    /// A slot pointing at a single sub-template reference expression.
    pub fn template(reference: impl Into<String>) -> Self {
        Self {
            value: vec![reference.into()],
            value_type: ValueType::Template,
        }
    }

    pub fn is_template(&self) -> bool {
        self.value_type == ValueType::Template
    }
}

/// How multiple attachments are laid out by the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentLayout {
    List,
    Carousel,
}

impl AttachmentLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentLayout::List => "list",
            AttachmentLayout::Carousel => "carousel",
        }
    }
}

impl fmt::Display for AttachmentLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(AttachmentLayout::List),
            "carousel" => Ok(AttachmentLayout::Carousel),
            other => Err(format!("invalid attachment layout: '{other}'")),
        }
    }
}

/// Delivery hint telling the channel whether the bot expects input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputHint {
    Accepting,
    Ignoring,
    Expecting,
}

impl InputHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputHint::Accepting => "accepting",
            InputHint::Ignoring => "ignoring",
            InputHint::Expecting => "expecting",
        }
    }
}

impl fmt::Display for InputHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepting" => Ok(InputHint::Accepting),
            "ignoring" => Ok(InputHint::Ignoring),
            "expecting" => Ok(InputHint::Expecting),
            other => Err(format!("invalid input hint: '{other}'")),
        }
    }
}

/// One modality of a structured response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ModalitySlot {
    Text(VariationSlot),
    Speak(VariationSlot),
    Attachments(VariationSlot),
    AttachmentLayout { value: AttachmentLayout },
    InputHint { value: InputHint },
    SuggestedActions { value: Vec<String> },
}

impl ModalitySlot {
    pub fn kind(&self) -> ModalityKind {
        match self {
            ModalitySlot::Text(_) => ModalityKind::Text,
            ModalitySlot::Speak(_) => ModalityKind::Speak,
            ModalitySlot::Attachments(_) => ModalityKind::Attachments,
            ModalitySlot::AttachmentLayout { .. } => ModalityKind::AttachmentLayout,
            ModalitySlot::InputHint { .. } => ModalityKind::InputHint,
            ModalitySlot::SuggestedActions { .. } => ModalityKind::SuggestedActions,
        }
    }

    /// Build a variation slot for one of Text, Speak or Attachments.
    ///
    /// Returns `None` for kinds that do not carry variations.
    pub fn variation(kind: ModalityKind, slot: VariationSlot) -> Option<Self> {
        match kind {
            ModalityKind::Text => Some(ModalitySlot::Text(slot)),
            ModalityKind::Speak => Some(ModalitySlot::Speak(slot)),
            ModalityKind::Attachments => Some(ModalitySlot::Attachments(slot)),
            _ => None,
        }
    }

    pub fn as_variation(&self) -> Option<&VariationSlot> {
        match self {
            ModalitySlot::Text(slot) | ModalitySlot::Speak(slot) | ModalitySlot::Attachments(slot) => {
                Some(slot)
            }
            _ => None,
        }
    }

    /// Whether the slot carries nothing worth emitting.
    pub fn is_empty(&self) -> bool {
        match self {
            ModalitySlot::Text(slot) | ModalitySlot::Speak(slot) | ModalitySlot::Attachments(slot) => {
                slot.value.is_empty()
            }
            ModalitySlot::SuggestedActions { value } => value.is_empty(),
            ModalitySlot::AttachmentLayout { .. } | ModalitySlot::InputHint { .. } => false,
        }
    }
}
