//! Business logic and repository trait definitions for Composer.
//!
//! This crate defines the "ports" (template, project, status and build
//! service traits) that the infrastructure layer implements, plus the pure
//! logic that sits between them: the structured-response codec, the modality
//! editing session, the build orchestrator and skill wiring. It depends only
//! on `composer-types` -- never on `composer-infra` or any IO crate.

pub mod build;
pub mod editor;
pub mod event;
pub mod lg;
pub mod repository;
pub mod service;
pub mod skill;
