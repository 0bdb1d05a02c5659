//! Build state and publish status files.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use composer_core::repository::status::{BuildStateStore, FileStatusStore};
use composer_types::build::{BuildState, FileKind};
use composer_types::error::RepositoryError;
use serde::{Deserialize, Serialize};

use super::{FileWorkspace, read_json, write_json};

/// Last publish time of every LU and QnA file, keyed by file id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishedFiles {
    #[serde(default)]
    pub lu: BTreeMap<String, DateTime<Utc>>,
    #[serde(default)]
    pub qna: BTreeMap<String, DateTime<Utc>>,
}

impl PublishedFiles {
    pub fn of_kind(&self, kind: FileKind) -> &BTreeMap<String, DateTime<Utc>> {
        match kind {
            FileKind::Lu => &self.lu,
            FileKind::Qna => &self.qna,
        }
    }

    fn of_kind_mut(&mut self, kind: FileKind) -> &mut BTreeMap<String, DateTime<Utc>> {
        match kind {
            FileKind::Lu => &mut self.lu,
            FileKind::Qna => &mut self.qna,
        }
    }
}

impl FileWorkspace {
    /// Publish status of a project; empty when nothing was published yet.
    pub async fn published_files(&self, project_id: &str) -> Result<PublishedFiles, RepositoryError> {
        Ok(read_json(&self.file_status_path(project_id))
            .await?
            .unwrap_or_default())
    }
}

impl BuildStateStore for FileWorkspace {
    async fn set_state(&self, project_id: &str, state: &BuildState) -> Result<(), RepositoryError> {
        tracing::debug!(project_id, status = %state.status, "recording build state");
        write_json(&self.build_state_path(project_id), state).await
    }

    async fn get_state(&self, project_id: &str) -> Result<Option<BuildState>, RepositoryError> {
        read_json(&self.build_state_path(project_id)).await
    }
}

impl FileStatusStore for FileWorkspace {
    async fn publish_all(&self, kind: FileKind, project_id: &str) -> Result<(), RepositoryError> {
        let project = self.load_project(project_id).await?;
        let ids: Vec<String> = match kind {
            FileKind::Lu => project.lu_files.into_iter().map(|f| f.id).collect(),
            FileKind::Qna => project.qna_files.into_iter().map(|f| f.id).collect(),
        };

        let lock = self.lock_for(project_id);
        let _guard = lock.lock().await;

        let path = self.file_status_path(project_id);
        let mut published: PublishedFiles = read_json(&path).await?.unwrap_or_default();
        let now = Utc::now();
        let entries = published.of_kind_mut(kind);
        for id in ids {
            entries.insert(id, now);
        }
        tracing::debug!(project_id, %kind, files = entries.len(), "marked files published");
        write_json(&path, &published).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::test_support::sample_project;
    use composer_types::build::{BuildFailure, BuildStatus};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_state_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());

        assert!(workspace.get_state("bot").await.unwrap().is_none());

        workspace
            .set_state("bot", &BuildState::new(BuildStatus::Building))
            .await
            .unwrap();
        assert_eq!(
            workspace.get_state("bot").await.unwrap().unwrap().status,
            BuildStatus::Building
        );

        workspace
            .set_state("bot", &BuildState::failed(BuildFailure::new("bad key")))
            .await
            .unwrap();
        let state = workspace.get_state("bot").await.unwrap().unwrap();
        assert_eq!(state.status, BuildStatus::Failed);
        assert_eq!(state.failure.unwrap().message, "bad key");
    }

    #[tokio::test]
    async fn test_publish_all_marks_only_requested_kind() {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());
        workspace
            .save_project("bot", &sample_project("main", None))
            .await
            .unwrap();

        assert_eq!(
            workspace.published_files("bot").await.unwrap(),
            PublishedFiles::default()
        );

        workspace.publish_all(FileKind::Lu, "bot").await.unwrap();
        let published = workspace.published_files("bot").await.unwrap();
        assert!(published.of_kind(FileKind::Lu).contains_key("main.en-us"));
        assert!(published.of_kind(FileKind::Qna).is_empty());

        workspace.publish_all(FileKind::Qna, "bot").await.unwrap();
        let published = workspace.published_files("bot").await.unwrap();
        assert_eq!(published.lu.len(), 1);
        assert_eq!(published.qna.len(), 1);
    }

    #[tokio::test]
    async fn test_publish_all_unknown_project() {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());
        assert!(matches!(
            workspace.publish_all(FileKind::Lu, "ghost").await,
            Err(RepositoryError::ProjectNotFound(_))
        ));
    }
}
