//! Remote build service trait definition.

use composer_types::build::{BuildRequest, CrossBuildRequest};
use composer_types::error::BuildServiceError;

/// The server-side LU/QnA compiler and publisher.
///
/// An issued request cannot be cancelled; callers wait for it to resolve.
pub trait BuildService: Send + Sync {
    /// `POST /projects/{project_id}/build`
    fn build(
        &self,
        project_id: &str,
        request: &BuildRequest,
    ) -> impl std::future::Future<Output = Result<(), BuildServiceError>> + Send;

    /// `POST /projects/{project_id}/crossbuild`
    fn cross_build(
        &self,
        project_id: &str,
        request: &CrossBuildRequest,
    ) -> impl std::future::Future<Output = Result<(), BuildServiceError>> + Send;
}
