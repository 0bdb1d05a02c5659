//! Modality editing session for structured bot responses.
//!
//! - [`session`]: the pure state machine (`EditorState`) whose transitions
//!   return the next state plus the template writes they require
//! - [`merge`]: partial-response merging
//! - [`cards`]: attachment card skeletons
//! - [`controller`]: `ResponseEditor`, which applies transitions write-through
//!   against a [`TemplateStore`](crate::repository::template::TemplateStore)

pub mod cards;
pub mod controller;
pub mod merge;
pub mod session;

pub use cards::CardKind;
pub use controller::ResponseEditor;
pub use session::{EditorState, TemplateEffect, Transition};
