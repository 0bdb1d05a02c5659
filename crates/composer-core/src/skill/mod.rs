//! Wiring child bots into an Orchestrator root bot as skills.

pub mod trigger;

pub use trigger::{SkillLinker, automatic_skill_trigger, camel_case};
