//! Build and publish types.
//!
//! Request bodies sent to the remote build service, the per-project build
//! status machine, and the report a build run produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::project::LuFile;

/// Title attached to every build failure record.
pub const BUILD_FAILURE_TITLE: &str = "LUIS deploy failure";

/// LUIS authoring configuration forwarded verbatim to the build service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LuisConfig {
    pub name: String,
    pub authoring_key: String,
    pub endpoint_key: String,
    pub authoring_region: String,
    pub default_language: String,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authoring_endpoint: Option<String>,
}

/// QnA Maker configuration forwarded verbatim to the build service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QnaConfig {
    pub subscription_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_key: Option<String>,
    pub qna_region: String,
}

/// Per-file entry of a build request. Empty files are still listed so the
/// remote compiler can skip them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub id: String,
    pub is_empty: bool,
}

/// Body of `POST /projects/{projectId}/build`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub luis_config: LuisConfig,
    pub qna_config: QnaConfig,
    pub project_id: String,
    pub lu_files: Vec<FileDescriptor>,
    pub qna_files: Vec<FileDescriptor>,
}

/// Body of `POST /projects/{projectId}/crossbuild`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossBuildRequest {
    #[serde(rename = "parentLU")]
    pub parent_lu: Vec<LuFile>,
    #[serde(rename = "luFilesToMerge")]
    pub lu_files_to_merge: Vec<LuFile>,
}

/// Lifecycle of one build-and-publish request.
///
/// `Idle -> Validating -> Building -> Publishing -> {Published, Failed}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    #[default]
    Idle,
    Validating,
    Building,
    Publishing,
    Published,
    Failed,
}

impl BuildStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildStatus::Published | BuildStatus::Failed)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Idle => write!(f, "idle"),
            BuildStatus::Validating => write!(f, "validating"),
            BuildStatus::Building => write!(f, "building"),
            BuildStatus::Publishing => write!(f, "publishing"),
            BuildStatus::Published => write!(f, "published"),
            BuildStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Error record stored alongside a `Failed` status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFailure {
    pub title: String,
    pub message: String,
}

impl BuildFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: BUILD_FAILURE_TITLE.to_string(),
            message: message.into(),
        }
    }
}

/// Last known build state of a project, as kept in the build-state store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    pub status: BuildStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<BuildFailure>,
    pub updated_at: DateTime<Utc>,
}

impl BuildState {
    pub fn new(status: BuildStatus) -> Self {
        Self {
            status,
            failure: None,
            updated_at: Utc::now(),
        }
    }

    pub fn failed(failure: BuildFailure) -> Self {
        Self {
            status: BuildStatus::Failed,
            failure: Some(failure),
            updated_at: Utc::now(),
        }
    }
}

impl Default for BuildState {
    fn default() -> Self {
        Self::new(BuildStatus::Idle)
    }
}

/// Which local status store a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Lu,
    Qna,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Lu => write!(f, "lu"),
            FileKind::Qna => write!(f, "qna"),
        }
    }
}

/// Result of the best-effort skill integration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CrossBuildOutcome {
    /// Root recognizer is not Orchestrator, or the main build did not succeed.
    NotApplicable,
    Completed { merged: Vec<String> },
    Failed { message: String },
}

/// What a build run did, returned to the caller in addition to the state
/// written into the build-state store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub project_id: String,
    pub status: BuildStatus,
    pub unsupported_locales: Vec<String>,
    pub failure: Option<BuildFailure>,
    pub cross_build: CrossBuildOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_wire_names() {
        let request = BuildRequest {
            luis_config: LuisConfig::default(),
            qna_config: QnaConfig::default(),
            project_id: "p1".to_string(),
            lu_files: vec![FileDescriptor {
                id: "main.en-us".to_string(),
                is_empty: true,
            }],
            qna_files: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["projectId"], "p1");
        assert_eq!(json["luFiles"][0]["isEmpty"], true);
        assert!(json["luisConfig"].get("authoringKey").is_some());
        assert!(json["luisConfig"].get("endpoint").is_none());
    }

    #[test]
    fn test_cross_build_wire_names() {
        let request = CrossBuildRequest {
            parent_lu: vec![],
            lu_files_to_merge: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("parentLU").is_some());
        assert!(json.get("luFilesToMerge").is_some());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(BuildStatus::Published.is_terminal());
        assert!(BuildStatus::Failed.is_terminal());
        assert!(!BuildStatus::Building.is_terminal());
        assert_eq!(BuildStatus::default(), BuildStatus::Idle);
    }

    #[test]
    fn test_failure_carries_title() {
        let failure = BuildFailure::new("boom");
        assert_eq!(failure.title, BUILD_FAILURE_TITLE);
        assert_eq!(failure.message, "boom");
    }
}
