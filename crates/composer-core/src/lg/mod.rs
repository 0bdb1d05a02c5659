//! Language-generation template handling.
//!
//! - [`expression`]: recognising `${...}` template references inside values
//! - [`activity`]: the minimal `[Activity ...]` body grammar (property bag extraction)
//! - [`codec`]: structured response <-> template body conversion
//! - [`validate`]: structured-response validation of a template record
//! - [`field`]: binding a dialog field to a designer-generated template

pub mod activity;
pub mod codec;
pub mod expression;
pub mod field;
pub mod validate;
