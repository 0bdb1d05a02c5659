//! `ProjectStore` over workspace projects.

use composer_core::repository::project::ProjectStore;
use composer_types::error::RepositoryError;
use composer_types::project::{DialogInfo, ProjectSnapshot};

use super::{FileWorkspace, ProjectFile};

fn snapshot_of(project_id: &str, project: ProjectFile) -> ProjectSnapshot {
    ProjectSnapshot {
        project_id: project_id.to_string(),
        dialogs: project.dialogs,
        lu_files: project.lu_files,
        qna_files: project.qna_files,
        settings: project.settings,
    }
}

impl ProjectStore for FileWorkspace {
    async fn snapshot(&self, project_id: &str) -> Result<ProjectSnapshot, RepositoryError> {
        let project = self.load_project(project_id).await?;
        Ok(snapshot_of(project_id, project))
    }

    async fn local_projects_without_errors(&self) -> Result<Vec<String>, RepositoryError> {
        let mut clean = Vec::new();
        for id in self.project_ids().await? {
            match self.load_project(&id).await {
                Ok(project) if !project.lu_files.iter().any(|f| f.has_errors()) => clean.push(id),
                Ok(_) => tracing::debug!(project_id = %id, "skipping project with LU errors"),
                Err(e) => tracing::warn!(project_id = %id, error = %e, "skipping unreadable project"),
            }
        }
        Ok(clean)
    }

    async fn update_dialog(&self, project_id: &str, dialog: &DialogInfo) -> Result<(), RepositoryError> {
        self.update_project(project_id, |project| {
            let slot = project
                .dialogs
                .iter_mut()
                .find(|d| d.id == dialog.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = dialog.clone();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::test_support::sample_project;
    use composer_types::project::{Diagnostic, LuProvider, Severity};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_snapshot_carries_project_id() {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());
        workspace
            .save_project("bot", &sample_project("main", Some(LuProvider::Luis)))
            .await
            .unwrap();

        let snapshot = workspace.snapshot("bot").await.unwrap();
        assert_eq!(snapshot.project_id, "bot");
        assert_eq!(snapshot.root_dialog().unwrap().lu_file, "main");
        assert_eq!(snapshot.lu_files[0].id, "main.en-us");
        assert_eq!(snapshot.settings.default_language, "en-us");
    }

    #[tokio::test]
    async fn test_local_projects_without_errors() {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());
        workspace
            .save_project("clean", &sample_project("main", None))
            .await
            .unwrap();

        let mut broken = sample_project("skill", None);
        broken.lu_files[0].diagnostics.push(Diagnostic {
            message: "syntax error".to_string(),
            severity: Severity::Error,
            source: "skill.en-us".to_string(),
        });
        workspace.save_project("broken", &broken).await.unwrap();

        let mut warned = sample_project("other", None);
        warned.lu_files[0].diagnostics.push(Diagnostic {
            message: "unused entity".to_string(),
            severity: Severity::Warning,
            source: "other.en-us".to_string(),
        });
        workspace.save_project("warned", &warned).await.unwrap();

        std::fs::create_dir_all(tmp.path().join("projects/garbled")).unwrap();
        std::fs::write(tmp.path().join("projects/garbled/project.json"), "[").unwrap();

        assert_eq!(
            workspace.local_projects_without_errors().await.unwrap(),
            ["clean", "warned"]
        );
    }

    #[tokio::test]
    async fn test_update_dialog_replaces_by_id() {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());
        workspace
            .save_project("bot", &sample_project("main", None))
            .await
            .unwrap();

        let mut dialog = workspace.snapshot("bot").await.unwrap().dialogs[0].clone();
        dialog.lu_provider = Some(LuProvider::Orchestrator);
        workspace.update_dialog("bot", &dialog).await.unwrap();

        let snapshot = workspace.snapshot("bot").await.unwrap();
        assert_eq!(snapshot.dialogs.len(), 1);
        assert_eq!(snapshot.dialogs[0].lu_provider, Some(LuProvider::Orchestrator));
    }

    #[tokio::test]
    async fn test_update_unknown_dialog() {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());
        workspace
            .save_project("bot", &sample_project("main", None))
            .await
            .unwrap();

        let mut dialog = workspace.snapshot("bot").await.unwrap().dialogs[0].clone();
        dialog.id = "nope".to_string();
        assert!(matches!(
            workspace.update_dialog("bot", &dialog).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
