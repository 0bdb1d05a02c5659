//! Template store trait definition.

use composer_types::error::RepositoryError;
use composer_types::template::LgTemplate;

/// Access to the templates of the LG files in a bot project.
///
/// The editing session consumes exactly these three operations. Uses native
/// async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait TemplateStore: Send + Sync {
    /// Fetch a template by name. `Ok(None)` when the file has no such template.
    fn get(
        &self,
        file_id: &str,
        template_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<LgTemplate>, RepositoryError>> + Send;

    /// Create or replace the body of a template.
    fn set(
        &self,
        file_id: &str,
        template_id: &str,
        body: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove a template. Removing a missing template is not an error.
    fn delete(
        &self,
        file_id: &str,
        template_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
