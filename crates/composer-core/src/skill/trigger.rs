//! Automatic skill intent trigger.
//!
//! When a skill is attached to a root bot whose recognizer is Orchestrator,
//! the root dialog gets an `OnIntent` trigger for the skill's intent that
//! begins the skill. Endpoint and app id are settings expressions keyed by
//! the camelCased skill name.

use composer_types::error::SkillLinkError;
use composer_types::project::{DialogInfo, LuProvider, TriggerInfo};
use serde_json::{Value, json};

use crate::repository::project::ProjectStore;
use crate::service::id::IdGenerator;

pub const ON_INTENT_KIND: &str = "Microsoft.OnIntent";
pub const BEGIN_SKILL_KIND: &str = "Microsoft.BeginSkill";

/// `camelCase` of a free-form name: words split on anything that is not a
/// letter or digit, and on lower-to-upper case boundaries.
pub fn camel_case(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 {
                return lower;
            }
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// The `OnIntent` trigger content that begins `skill_name`.
pub fn automatic_skill_trigger(skill_name: &str, ids: &impl IdGenerator) -> Value {
    let camel = camel_case(skill_name);
    json!({
        "$kind": ON_INTENT_KIND,
        "$designer": {
            "id": ids.next(),
            "name": skill_name,
        },
        "intent": skill_name,
        "actions": [
            {
                "$kind": BEGIN_SKILL_KIND,
                "$designer": {
                    "id": ids.next(),
                },
                "activityProcessed": true,
                "botId": "=settings.MicrosoftAppId",
                "skillHostEndpoint": "=settings.skillHostEndpoint",
                "connectionName": "=settings.connectionName",
                "allowInterruptions": true,
                "skillEndpoint": format!("=settings.skill['{camel}'].endpointUrl"),
                "skillAppId": format!("=settings.skill['{camel}'].msAppId"),
            }
        ],
    })
}

/// Adds skill triggers to root dialogs.
pub struct SkillLinker<P: ProjectStore, I: IdGenerator> {
    projects: P,
    ids: I,
}

impl<P: ProjectStore, I: IdGenerator> SkillLinker<P, I> {
    pub fn new(projects: P, ids: I) -> Self {
        Self { projects, ids }
    }

    /// Give the root bot an intent trigger that begins the child bot.
    ///
    /// Returns the updated root dialog, or `None` when the root recognizer is
    /// not Orchestrator (nothing changes then).
    pub async fn create_automatic_trigger(
        &self,
        root_project_id: &str,
        child_project_id: &str,
    ) -> Result<Option<DialogInfo>, SkillLinkError> {
        let root_snapshot = self.projects.snapshot(root_project_id).await?;
        let root = root_snapshot
            .root_dialog()
            .ok_or_else(|| SkillLinkError::MissingRootDialog(root_project_id.to_string()))?;
        if root.lu_provider != Some(LuProvider::Orchestrator) {
            tracing::debug!(root = %root_project_id, "root recognizer is not Orchestrator; no trigger added");
            return Ok(None);
        }

        let child_snapshot = self.projects.snapshot(child_project_id).await?;
        let skill_name = child_snapshot
            .root_dialog()
            .map(|d| d.lu_file.clone())
            .ok_or_else(|| SkillLinkError::MissingRootDialog(child_project_id.to_string()))?;

        let trigger = automatic_skill_trigger(&skill_name, &self.ids);

        let mut dialog = root.clone();
        let content = dialog
            .content
            .as_object_mut()
            .ok_or(SkillLinkError::MalformedDialog)?;
        match content
            .entry("triggers")
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(triggers) => triggers.push(trigger.clone()),
            _ => return Err(SkillLinkError::MalformedDialog),
        }
        dialog.triggers.push(TriggerInfo {
            display_name: skill_name.clone(),
            kind: ON_INTENT_KIND.to_string(),
            is_intent: true,
            content: trigger,
        });

        self.projects.update_dialog(root_project_id, &dialog).await?;
        tracing::info!(root = %root_project_id, skill = %skill_name, "skill intent trigger added");
        Ok(Some(dialog))
    }
}
