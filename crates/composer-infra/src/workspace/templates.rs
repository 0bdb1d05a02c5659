//! `TemplateStore` over the LG files of one workspace project.

use composer_core::lg::activity::activity_properties;
use composer_core::repository::template::TemplateStore;
use composer_types::error::RepositoryError;
use composer_types::template::LgTemplate;

use super::{FileWorkspace, LgFile, StoredTemplate};

/// Templates of a single project. Obtained from [`FileWorkspace::templates`].
#[derive(Debug, Clone)]
pub struct ProjectTemplates {
    workspace: FileWorkspace,
    project_id: String,
}

impl ProjectTemplates {
    pub(crate) fn new(workspace: FileWorkspace, project_id: String) -> Self {
        Self {
            workspace,
            project_id,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Every template of an LG file, in file order.
    pub async fn list(&self, file_id: &str) -> Result<Vec<LgTemplate>, RepositoryError> {
        let project = self.workspace.load_project(&self.project_id).await?;
        Ok(project
            .lg_files
            .iter()
            .find(|f| f.id == file_id)
            .map(|f| f.templates.iter().map(to_template).collect())
            .unwrap_or_default())
    }
}

fn to_template(stored: &StoredTemplate) -> LgTemplate {
    LgTemplate {
        name: stored.name.clone(),
        parameters: stored.parameters.clone(),
        body: stored.body.clone(),
        properties: activity_properties(&stored.body).unwrap_or_default(),
    }
}

impl TemplateStore for ProjectTemplates {
    async fn get(
        &self,
        file_id: &str,
        template_id: &str,
    ) -> Result<Option<LgTemplate>, RepositoryError> {
        let project = self.workspace.load_project(&self.project_id).await?;
        Ok(project
            .lg_files
            .iter()
            .find(|f| f.id == file_id)
            .and_then(|f| f.templates.iter().find(|t| t.name == template_id))
            .map(to_template))
    }

    async fn set(&self, file_id: &str, template_id: &str, body: &str) -> Result<(), RepositoryError> {
        tracing::debug!(
            project_id = %self.project_id,
            file_id,
            template_id,
            "writing template"
        );
        self.workspace
            .update_project(&self.project_id, |project| {
                let file = match project.lg_files.iter().position(|f| f.id == file_id) {
                    Some(index) => &mut project.lg_files[index],
                    None => {
                        project.lg_files.push(LgFile {
                            id: file_id.to_string(),
                            templates: Vec::new(),
                        });
                        let last = project.lg_files.len() - 1;
                        &mut project.lg_files[last]
                    }
                };

                match file.templates.iter_mut().find(|t| t.name == template_id) {
                    Some(template) => template.body = body.to_string(),
                    None => file.templates.push(StoredTemplate {
                        name: template_id.to_string(),
                        parameters: Vec::new(),
                        body: body.to_string(),
                    }),
                }
                Ok(())
            })
            .await
    }

    async fn delete(&self, file_id: &str, template_id: &str) -> Result<(), RepositoryError> {
        tracing::debug!(
            project_id = %self.project_id,
            file_id,
            template_id,
            "deleting template"
        );
        self.workspace
            .update_project(&self.project_id, |project| {
                if let Some(file) = project.lg_files.iter_mut().find(|f| f.id == file_id) {
                    file.templates.retain(|t| t.name != template_id);
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::test_support::sample_project;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, ProjectTemplates) {
        let tmp = TempDir::new().unwrap();
        let workspace = FileWorkspace::new(tmp.path());
        workspace
            .save_project("bot", &sample_project("main", None))
            .await
            .unwrap();
        let templates = workspace.templates("bot");
        (tmp, templates)
    }

    #[tokio::test]
    async fn test_get_missing_template() {
        let (_tmp, templates) = setup().await;
        assert!(templates.get("main.en-us", "nope").await.unwrap().is_none());
        assert!(templates.get("other.en-us", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_derives_properties() {
        let (_tmp, templates) = setup().await;
        templates
            .set(
                "main.en-us",
                "bfdactivity-1",
                "[Activity\n    Text = ${bfdactivity-1_text()}\n]",
            )
            .await
            .unwrap();

        let template = templates
            .get("main.en-us", "bfdactivity-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(template.template_type(), Some("Activity"));
        assert_eq!(
            template.properties.get("Text"),
            Some(&serde_json::json!("${bfdactivity-1_text()}"))
        );
    }

    #[tokio::test]
    async fn test_set_replaces_body_and_keeps_order() {
        let (_tmp, templates) = setup().await;
        templates.set("main.en-us", "a", "- one").await.unwrap();
        templates.set("main.en-us", "b", "- two").await.unwrap();
        templates.set("main.en-us", "a", "- uno").await.unwrap();

        let listed = templates.list("main.en-us").await.unwrap();
        let names: Vec<_> = listed.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(listed[0].body, "- uno");
        assert!(listed[0].properties.is_empty());
    }

    #[tokio::test]
    async fn test_set_creates_missing_file() {
        let (_tmp, templates) = setup().await;
        templates.set("dialog1.en-us", "t", "- hi").await.unwrap();
        assert_eq!(templates.list("dialog1.en-us").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_tmp, templates) = setup().await;
        templates.set("main.en-us", "t", "- hi").await.unwrap();
        templates.delete("main.en-us", "t").await.unwrap();
        templates.delete("main.en-us", "t").await.unwrap();
        templates.delete("missing.en-us", "t").await.unwrap();
        assert!(templates.get("main.en-us", "t").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_to_unknown_project_fails() {
        let tmp = TempDir::new().unwrap();
        let templates = FileWorkspace::new(tmp.path()).templates("ghost");
        assert!(matches!(
            templates.set("main.en-us", "t", "- hi").await,
            Err(RepositoryError::ProjectNotFound(_))
        ));
    }
}
