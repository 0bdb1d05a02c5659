//! Shared domain types for Composer.
//!
//! This crate contains the core domain types used across the Composer
//! authoring subsystem: structured bot responses and their modality slots,
//! LG template records, dialog/LU/QnA project files, build requests,
//! notifications, configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod build;
pub mod config;
pub mod error;
pub mod modality;
pub mod notification;
pub mod project;
pub mod response;
pub mod template;
