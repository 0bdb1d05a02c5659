//! Build-and-publish state machine for one bot project.
//!
//! `Idle -> Validating -> Building -> Publishing -> {Published, Failed}`
//!
//! A run never returns an error: every failure ends in `Failed` with a
//! [`BuildFailure`] written to the build-state store and carried in the
//! returned [`BuildReport`]. Validation always completes before any request is
//! sent, and the cross-bot step (Orchestrator roots only) runs strictly after
//! the main build has been published. A failing cross-bot step is reported
//! but leaves the project `Published`.

use composer_types::build::{
    BuildFailure, BuildReport, BuildRequest, BuildState, BuildStatus, CrossBuildOutcome,
    CrossBuildRequest, FileDescriptor, FileKind, LuisConfig, QnaConfig,
};
use composer_types::config::ComposerConfig;
use composer_types::notification::{DEFAULT_RETENTION_MS, Notification, NotificationKind};
use composer_types::project::{LuFile, LuProvider, ProjectSnapshot};
use tracing::{Instrument, info_span};

use super::locale::{LUIS_LOCALES, unsupported_locales};
use super::reachability::{referred_lu_files, referred_qna_files};
use super::validation::{lu_errors, qna_errors};
use crate::event::Notifier;
use crate::repository::project::ProjectStore;
use crate::repository::status::{BuildStateStore, FileStatusStore};
use crate::service::build::BuildService;

pub const LOCALE_WARNING_TITLE: &str = "Luis build warning";
pub const CROSS_BUILD_FAILURE_TITLE: &str = "Orchestrator skill build failure";

/// Tunables of a build run.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Locales the LU engine accepts.
    pub supported_locales: Vec<String>,
    /// Retention of the unsupported-locale warning.
    pub notification_retention_ms: u64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            supported_locales: LUIS_LOCALES.iter().map(|l| l.to_string()).collect(),
            notification_retention_ms: DEFAULT_RETENTION_MS,
        }
    }
}

impl BuildSettings {
    pub fn from_config(config: &ComposerConfig) -> Self {
        let defaults = Self::default();
        Self {
            supported_locales: config
                .supported_locales
                .clone()
                .unwrap_or(defaults.supported_locales),
            notification_retention_ms: config.notification_retention_ms,
        }
    }
}

/// Runs builds against the project store and the remote build service.
///
/// Generic over the store and service ports -- composer-core never depends
/// on composer-infra.
pub struct BuildOrchestrator<P, B, S, F, N>
where
    P: ProjectStore,
    B: BuildService,
    S: BuildStateStore,
    F: FileStatusStore,
    N: Notifier,
{
    projects: P,
    service: B,
    states: S,
    file_status: F,
    notifier: N,
    settings: BuildSettings,
}

impl<P, B, S, F, N> BuildOrchestrator<P, B, S, F, N>
where
    P: ProjectStore,
    B: BuildService,
    S: BuildStateStore,
    F: FileStatusStore,
    N: Notifier,
{
    pub fn new(
        projects: P,
        service: B,
        states: S,
        file_status: F,
        notifier: N,
        settings: BuildSettings,
    ) -> Self {
        Self {
            projects,
            service,
            states,
            file_status,
            notifier,
            settings,
        }
    }

    /// Last recorded build state of a project.
    pub async fn state(&self, project_id: &str) -> Option<BuildState> {
        match self.states.get_state(project_id).await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(project.id = %project_id, error = %e, "could not read build state");
                None
            }
        }
    }

    /// Validate, build and publish `project_id`.
    pub async fn build(&self, project_id: &str, luis: &LuisConfig, qna: &QnaConfig) -> BuildReport {
        let span = info_span!("build", project.id = %project_id);
        self.run(project_id, luis, qna).instrument(span).await
    }

    async fn run(&self, project_id: &str, luis: &LuisConfig, qna: &QnaConfig) -> BuildReport {
        let mut report = BuildReport {
            project_id: project_id.to_string(),
            status: BuildStatus::Idle,
            unsupported_locales: Vec::new(),
            failure: None,
            cross_build: CrossBuildOutcome::NotApplicable,
        };

        self.transition(&mut report, BuildStatus::Validating).await;

        let snapshot = match self.projects.snapshot(project_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => return self.fail(report, e.to_string()).await,
        };

        let lu_files = referred_lu_files(&snapshot.lu_files, &snapshot.dialogs);
        let qna_files = referred_qna_files(&snapshot.qna_files, &snapshot.dialogs);

        report.unsupported_locales =
            unsupported_locales(&snapshot.settings.languages, &self.settings.supported_locales);
        if !report.unsupported_locales.is_empty() {
            let locales = report.unsupported_locales.join(" ");
            tracing::warn!(locales = %locales, "building with locales the LU engine does not support");
            self.notifier.notify(
                Notification::warning(
                    LOCALE_WARNING_TITLE,
                    format!("locale \"{locales}\" is not supported by LUIS"),
                )
                .with_retention(self.settings.notification_retention_ms),
            );
        }

        let mut errors = qna_errors(&qna_files);
        errors.extend(lu_errors(&lu_files));
        if !errors.is_empty() {
            return self.fail(report, errors.join("\n")).await;
        }

        self.transition(&mut report, BuildStatus::Building).await;

        let request = BuildRequest {
            luis_config: luis.clone(),
            qna_config: qna.clone(),
            project_id: project_id.to_string(),
            lu_files: lu_files
                .iter()
                .map(|f| FileDescriptor {
                    id: f.id.clone(),
                    is_empty: f.empty,
                })
                .collect(),
            qna_files: qna_files
                .iter()
                .map(|f| FileDescriptor {
                    id: f.id.clone(),
                    is_empty: f.empty,
                })
                .collect(),
        };
        tracing::info!(
            lu_files = request.lu_files.len(),
            qna_files = request.qna_files.len(),
            "sending build request"
        );
        if let Err(e) = self.service.build(project_id, &request).await {
            return self.fail(report, e.user_message()).await;
        }

        self.transition(&mut report, BuildStatus::Publishing).await;
        for kind in [FileKind::Lu, FileKind::Qna] {
            if let Err(e) = self.file_status.publish_all(kind, project_id).await {
                tracing::warn!(kind = %kind, error = %e, "could not mark files as published");
            }
        }
        self.transition(&mut report, BuildStatus::Published).await;
        tracing::info!("build published");

        report.cross_build = self.cross_build(&snapshot).await;
        report
    }

    /// Merge the LU models of every other local bot into an Orchestrator
    /// root. Best effort: the outcome is reported, the status is untouched.
    async fn cross_build(&self, snapshot: &ProjectSnapshot) -> CrossBuildOutcome {
        let Some(root) = snapshot
            .root_dialog()
            .filter(|d| d.lu_provider == Some(LuProvider::Orchestrator))
        else {
            return CrossBuildOutcome::NotApplicable;
        };

        let parent_lu: Vec<LuFile> = snapshot
            .lu_files
            .iter()
            .filter(|f| f.id.starts_with(&root.lu_file))
            .cloned()
            .collect();

        let skill_lu = match self.skill_lu_files(&snapshot.project_id).await {
            Ok(files) => files,
            Err(message) => return self.cross_build_failed(message),
        };
        let merged: Vec<String> = skill_lu.iter().map(|f| f.id.clone()).collect();

        let request = CrossBuildRequest {
            parent_lu,
            lu_files_to_merge: skill_lu,
        };
        tracing::info!(skills = merged.len(), "sending cross-bot build request");
        match self.service.cross_build(&snapshot.project_id, &request).await {
            Ok(()) => CrossBuildOutcome::Completed { merged },
            Err(e) => self.cross_build_failed(e.user_message()),
        }
    }

    /// Root LU file of every other error-free local project whose root dialog
    /// has a recognizer. Empty files are skipped.
    async fn skill_lu_files(&self, project_id: &str) -> Result<Vec<LuFile>, String> {
        let others = self
            .projects
            .local_projects_without_errors()
            .await
            .map_err(|e| e.to_string())?;

        let mut files = Vec::new();
        for other in others.iter().filter(|id| id.as_str() != project_id) {
            let skill = match self.projects.snapshot(other).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(skill = %other, error = %e, "skipping unreadable skill project");
                    continue;
                }
            };
            let Some(root) = skill.root_dialog().filter(|d| d.lu_provider.is_some()) else {
                continue;
            };
            if let Some(file) = skill
                .lu_files
                .iter()
                .find(|f| f.id.starts_with(&root.lu_file) && !f.empty)
            {
                files.push(file.clone());
            }
        }
        Ok(files)
    }

    fn cross_build_failed(&self, message: String) -> CrossBuildOutcome {
        tracing::warn!(error = %message, "cross-bot build failed");
        self.notifier.notify(Notification::new(
            NotificationKind::Error,
            CROSS_BUILD_FAILURE_TITLE,
            message.clone(),
        ));
        CrossBuildOutcome::Failed { message }
    }

    async fn transition(&self, report: &mut BuildReport, status: BuildStatus) {
        tracing::debug!(from = %report.status, to = %status, "build transition");
        report.status = status;
        self.store_state(&report.project_id, &BuildState::new(status)).await;
    }

    async fn fail(&self, mut report: BuildReport, message: String) -> BuildReport {
        tracing::error!(error = %message, "build failed");
        let failure = BuildFailure::new(message);
        self.store_state(&report.project_id, &BuildState::failed(failure.clone()))
            .await;
        report.status = BuildStatus::Failed;
        report.failure = Some(failure);
        report
    }

    async fn store_state(&self, project_id: &str, state: &BuildState) {
        if let Err(e) = self.states.set_state(project_id, state).await {
            tracing::warn!(error = %e, status = %state.status, "could not record build state");
        }
    }
}
