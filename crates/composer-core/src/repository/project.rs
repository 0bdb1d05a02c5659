//! Project store trait definition.

use composer_types::error::RepositoryError;
use composer_types::project::{DialogInfo, ProjectSnapshot};

/// Read access to indexed bot projects, plus the dialog write-back used when
/// wiring skills.
pub trait ProjectStore: Send + Sync {
    /// Current dialogs, LU files, QnA files and settings of a project.
    fn snapshot(
        &self,
        project_id: &str,
    ) -> impl std::future::Future<Output = Result<ProjectSnapshot, RepositoryError>> + Send;

    /// Ids of every locally known project whose files index without errors.
    fn local_projects_without_errors(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Replace a dialog (matched by id) in a project.
    fn update_dialog(
        &self,
        project_id: &str,
        dialog: &DialogInfo,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
