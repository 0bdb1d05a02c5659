//! JSON-file workspace store.
//!
//! Each bot project lives in its own directory under the data dir:
//!
//! ```text
//! {data_dir}/projects/{project_id}/
//!     project.json      dialogs, LU/QnA files, settings, LG templates
//!     build-state.json  last build status and failure
//!     file-status.json  publish timestamps of LU/QnA files
//! ```
//!
//! `FileWorkspace` implements every store port of `composer-core`. Reads go
//! to disk each time so callers always see a fresh snapshot; writes are
//! read-modify-write cycles serialized per project by an in-process lock.

pub mod project;
pub mod status;
pub mod templates;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use composer_types::error::RepositoryError;
use composer_types::project::{DialogInfo, LuFile, ProjectSettings, QnaFile};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub use status::PublishedFiles;
pub use templates::ProjectTemplates;

const PROJECT_FILE: &str = "project.json";
const BUILD_STATE_FILE: &str = "build-state.json";
const FILE_STATUS_FILE: &str = "file-status.json";

/// On-disk form of one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default)]
    pub dialogs: Vec<DialogInfo>,
    #[serde(default)]
    pub lu_files: Vec<LuFile>,
    #[serde(default)]
    pub qna_files: Vec<QnaFile>,
    #[serde(default)]
    pub settings: ProjectSettings,
    #[serde(default)]
    pub lg_files: Vec<LgFile>,
}

/// One language-generation file (`{dialog}.{locale}`) and its templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LgFile {
    pub id: String,
    #[serde(default)]
    pub templates: Vec<StoredTemplate>,
}

/// Template as stored: the property bag is derived from the body on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTemplate {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub body: String,
}

/// Filesystem-backed workspace. Cloning shares the per-project locks.
#[derive(Debug, Clone)]
pub struct FileWorkspace {
    root: PathBuf,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl FileWorkspace {
    /// Workspace rooted at `{data_dir}/projects`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join("projects"),
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn projects_dir(&self) -> &Path {
        &self.root
    }

    pub fn project_dir(&self, project_id: &str) -> PathBuf {
        self.root.join(project_id)
    }

    /// Template store scoped to one project.
    pub fn templates(&self, project_id: impl Into<String>) -> ProjectTemplates {
        ProjectTemplates::new(self.clone(), project_id.into())
    }

    /// Create or overwrite a project.
    pub async fn save_project(
        &self,
        project_id: &str,
        project: &ProjectFile,
    ) -> Result<(), RepositoryError> {
        let lock = self.lock_for(project_id);
        let _guard = lock.lock().await;
        write_json(&self.project_dir(project_id).join(PROJECT_FILE), project).await
    }

    /// Load a project; `ProjectNotFound` when it has no `project.json`.
    pub async fn load_project(&self, project_id: &str) -> Result<ProjectFile, RepositoryError> {
        read_json(&self.project_dir(project_id).join(PROJECT_FILE))
            .await?
            .ok_or_else(|| RepositoryError::ProjectNotFound(project_id.to_string()))
    }

    /// Ids of every project directory that holds a `project.json`, sorted.
    pub async fn project_ids(&self) -> Result<Vec<String>, RepositoryError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.root, e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.root, e))?
        {
            let path = entry.path();
            if !tokio::fs::try_exists(path.join(PROJECT_FILE))
                .await
                .unwrap_or(false)
            {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                ids.push(name.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Read-modify-write of `project.json` under the project's lock.
    pub(crate) async fn update_project<R, F>(
        &self,
        project_id: &str,
        update: F,
    ) -> Result<R, RepositoryError>
    where
        F: FnOnce(&mut ProjectFile) -> Result<R, RepositoryError> + Send,
        R: Send,
    {
        let lock = self.lock_for(project_id);
        let _guard = lock.lock().await;

        let mut project = self.load_project(project_id).await?;
        let result = update(&mut project)?;
        write_json(&self.project_dir(project_id).join(PROJECT_FILE), &project).await?;
        Ok(result)
    }

    pub(crate) fn build_state_path(&self, project_id: &str) -> PathBuf {
        self.project_dir(project_id).join(BUILD_STATE_FILE)
    }

    pub(crate) fn file_status_path(&self, project_id: &str) -> PathBuf {
        self.project_dir(project_id).join(FILE_STATUS_FILE)
    }

    pub(crate) fn lock_for(&self, project_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(project_id.to_string())
            .or_default()
            .clone()
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::Io(format!("{}: {err}", path.display()))
}

/// Read and parse a JSON file; `Ok(None)` when it does not exist.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| RepositoryError::Malformed(format!("{}: {e}", path.display())))
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories.
pub(crate) async fn write_json<T: Serialize + Sync>(path: &Path, value: &T) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(parent, e))?;
    }
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| RepositoryError::Malformed(e.to_string()))?;
    tokio::fs::write(path, content)
        .await
        .map_err(|e| io_error(path, e))
}
