//! Bot project snapshot types: dialogs, LU files, QnA files, settings.
//!
//! These mirror the indexed project state the authoring tool keeps per bot
//! project. Field names follow the camelCase JSON the build service and the
//! workspace files use.

use serde::{Deserialize, Serialize};

/// Recognizer configured on a dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuProvider {
    #[serde(rename = "Microsoft.LuisRecognizer")]
    Luis,
    /// Cross-bot recognizer that dispatches intents to skills.
    #[serde(rename = "Microsoft.OrchestratorRecognizer")]
    Orchestrator,
}

/// Summary of one trigger inside a dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerInfo {
    pub display_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_intent: bool,
    #[serde(default)]
    pub content: serde_json::Value,
}

/// An indexed dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogInfo {
    pub id: String,
    #[serde(default)]
    pub is_root: bool,
    /// LU file id without locale suffix (e.g. `main`).
    #[serde(default)]
    pub lu_file: String,
    /// QnA file id without locale suffix.
    #[serde(default)]
    pub qna_file: String,
    #[serde(default)]
    pub lu_provider: Option<LuProvider>,
    /// Raw dialog document.
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub triggers: Vec<TriggerInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub source: String,
}

/// A language-understanding file, id carries the locale (`main.en-us`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuFile {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl LuFile {
    pub fn base_name(&self) -> &str {
        base_name(&self.id)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QnaQuestion {
    #[serde(default)]
    pub content: String,
}

/// One question/answer pair block of a QnA file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QnaSection {
    #[serde(rename = "Questions", default)]
    pub questions: Vec<QnaQuestion>,
    #[serde(rename = "Answer", default)]
    pub answer: String,
}

/// A QnA knowledge-base file, id carries the locale (`main.en-us`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QnaFile {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub qna_sections: Vec<QnaSection>,
}

impl QnaFile {
    pub fn base_name(&self) -> &str {
        base_name(&self.id)
    }
}

/// Per-project settings relevant to building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub default_language: String,
}

/// Point-in-time view of one bot project, read before a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub project_id: String,
    #[serde(default)]
    pub dialogs: Vec<DialogInfo>,
    #[serde(default)]
    pub lu_files: Vec<LuFile>,
    #[serde(default)]
    pub qna_files: Vec<QnaFile>,
    #[serde(default)]
    pub settings: ProjectSettings,
}

impl ProjectSnapshot {
    /// The entry dialog of the bot. Projects have at most one.
    pub fn root_dialog(&self) -> Option<&DialogInfo> {
        self.dialogs.iter().find(|d| d.is_root)
    }

    pub fn has_lu_errors(&self) -> bool {
        self.lu_files.iter().any(LuFile::has_errors)
    }
}

/// Strip the trailing `.locale` segment from a file id.
///
/// `main.en-us` -> `main`; ids without a dot are returned unchanged.
pub fn base_name(id: &str) -> &str {
    match id.rfind('.') {
        Some(idx) => &id[..idx],
        None => id,
    }
}
