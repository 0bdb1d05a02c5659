//! Infrastructure layer for Composer.
//!
//! Contains implementations of the ports defined in `composer-core`: the
//! JSON-file workspace (templates, projects, build state, publish status),
//! the HTTP build-service client, random id generation, and config loading.

pub mod config;
pub mod http;
pub mod id;
pub mod workspace;
