//! Build-and-publish orchestration.
//!
//! - [`reachability`]: which LU/QnA files the dialogs actually reference
//! - [`locale`]: locales the LU engine can build
//! - [`validation`]: pre-flight checks that fail a build without a round trip
//! - [`orchestrator`]: the `Idle -> ... -> Published/Failed` state machine

pub mod locale;
pub mod orchestrator;
pub mod reachability;
pub mod validation;

pub use orchestrator::{BuildOrchestrator, BuildSettings};
