//! Application state wiring the workspace, build service and notifications.
//!
//! Core services are generic over store/service traits; AppState pins them to
//! the concrete infra implementations.

use std::path::PathBuf;

use anyhow::Context;
use composer_core::build::{BuildOrchestrator, BuildSettings};
use composer_core::editor::ResponseEditor;
use composer_core::event::NotificationBus;
use composer_core::skill::SkillLinker;
use composer_infra::config::{load_config, request_timeout, resolve_data_dir};
use composer_infra::http::HttpBuildService;
use composer_infra::id::RandomIdGenerator;
use composer_infra::workspace::{FileWorkspace, ProjectTemplates};
use composer_types::config::ComposerConfig;
use composer_types::error::EditorError;

/// Notification channel depth; a CLI run raises a handful at most.
const NOTIFICATION_CAPACITY: usize = 64;

pub type ConcreteOrchestrator =
    BuildOrchestrator<FileWorkspace, HttpBuildService, FileWorkspace, FileWorkspace, NotificationBus>;

pub type ConcreteEditor = ResponseEditor<ProjectTemplates, RandomIdGenerator>;

pub type ConcreteSkillLinker = SkillLinker<FileWorkspace, RandomIdGenerator>;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ComposerConfig,
    pub workspace: FileWorkspace,
    pub notifications: NotificationBus,
}

impl AppState {
    /// Resolve the data dir, load `config.toml` and open the workspace.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;
        let workspace = FileWorkspace::new(&data_dir);

        Ok(Self {
            data_dir,
            config,
            workspace,
            notifications: NotificationBus::new(NOTIFICATION_CAPACITY),
        })
    }

    pub fn orchestrator(&self) -> anyhow::Result<ConcreteOrchestrator> {
        let service = HttpBuildService::new(
            self.config.build_service_url.clone(),
            request_timeout(&self.config),
        )
        .context("failed to set up build service client")?;

        Ok(BuildOrchestrator::new(
            self.workspace.clone(),
            service,
            self.workspace.clone(),
            self.workspace.clone(),
            self.notifications.clone(),
            BuildSettings::from_config(&self.config),
        ))
    }

    pub async fn editor(
        &self,
        project_id: &str,
        file_id: &str,
        template_id: &str,
    ) -> Result<ConcreteEditor, EditorError> {
        ResponseEditor::open(
            self.workspace.templates(project_id),
            RandomIdGenerator,
            file_id,
            template_id,
        )
        .await
    }

    pub fn skill_linker(&self) -> ConcreteSkillLinker {
        SkillLinker::new(self.workspace.clone(), RandomIdGenerator)
    }
}
