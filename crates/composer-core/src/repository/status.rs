//! Build-state and file-status store trait definitions.

use composer_types::build::{BuildState, FileKind};
use composer_types::error::RepositoryError;

/// Per-project build status and last failure.
///
/// Shared mutable state: two builds of the same project are not coordinated
/// and the last writer wins.
pub trait BuildStateStore: Send + Sync {
    fn set_state(
        &self,
        project_id: &str,
        state: &BuildState,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// `Ok(None)` when the project was never built.
    fn get_state(
        &self,
        project_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<BuildState>, RepositoryError>> + Send;
}

/// Local publish status of LU and QnA files.
pub trait FileStatusStore: Send + Sync {
    /// Mark every file of `kind` in the project as published.
    fn publish_all(
        &self,
        kind: FileKind,
        project_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
