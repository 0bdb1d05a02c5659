//! HTTP clients for remote services.

pub mod build_service;

pub use build_service::HttpBuildService;
