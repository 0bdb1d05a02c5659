//! Service ports: the remote build service and id generation.

pub mod build;
pub mod id;
