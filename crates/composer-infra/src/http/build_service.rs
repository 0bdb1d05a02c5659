//! reqwest client for the remote LU/QnA build service.
//!
//! `POST {base_url}/projects/{id}/build` and `/crossbuild` with JSON bodies.
//! Any 2xx is success; the response body is ignored. Failure payloads carry
//! the author-facing text in `message` or `data.message`.

use std::time::Duration;

use composer_core::service::build::BuildService;
use composer_types::build::{BuildRequest, CrossBuildRequest};
use composer_types::error::BuildServiceError;
use serde::Serialize;
use serde_json::Value;

/// Build service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBuildService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBuildService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BuildServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BuildServiceError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, project_id: &str, action: &str) -> String {
        format!("{}/projects/{project_id}/{action}", self.base_url)
    }

    async fn post<T: Serialize + Sync>(&self, url: &str, body: &T) -> Result<(), BuildServiceError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| BuildServiceError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(%url, %status, body = %error_body, "build service rejected request");
            return Err(BuildServiceError::Remote {
                status: status.as_u16(),
                server_message: server_message(&error_body),
            });
        }
        Ok(())
    }
}

/// `message` or `data.message` of a JSON failure payload.
fn server_message(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    payload
        .get("message")
        .or_else(|| payload.get("data").and_then(|d| d.get("message")))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

impl BuildService for HttpBuildService {
    async fn build(&self, project_id: &str, request: &BuildRequest) -> Result<(), BuildServiceError> {
        let url = self.url(project_id, "build");
        tracing::info!(
            %url,
            lu_files = request.lu_files.len(),
            qna_files = request.qna_files.len(),
            "requesting build"
        );
        self.post(&url, request).await
    }

    async fn cross_build(
        &self,
        project_id: &str,
        request: &CrossBuildRequest,
    ) -> Result<(), BuildServiceError> {
        let url = self.url(project_id, "crossbuild");
        tracing::info!(
            %url,
            parent_lu = request.parent_lu.len(),
            skills = request.lu_files_to_merge.len(),
            "requesting cross build"
        );
        self.post(&url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use composer_types::build::{FileDescriptor, LuisConfig, QnaConfig};
    use serde_json::json;

    #[derive(Clone, Default)]
    struct Recorded {
        calls: Arc<Mutex<Vec<(String, String, Value)>>>,
    }

    async fn record_build(
        State(recorded): State<Recorded>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        recorded
            .calls
            .lock()
            .unwrap()
            .push(("build".to_string(), id, body));
        StatusCode::OK
    }

    async fn record_cross_build(
        State(recorded): State<Recorded>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        recorded
            .calls
            .lock()
            .unwrap()
            .push(("crossbuild".to_string(), id, body));
        StatusCode::NO_CONTENT
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn build_request() -> BuildRequest {
        BuildRequest {
            luis_config: LuisConfig {
                name: "travel".to_string(),
                authoring_key: "key".to_string(),
                ..Default::default()
            },
            qna_config: QnaConfig::default(),
            project_id: "bot".to_string(),
            lu_files: vec![FileDescriptor {
                id: "main.en-us".to_string(),
                is_empty: false,
            }],
            qna_files: Vec::new(),
        }
    }

    #[test]
    fn test_server_message_extraction() {
        assert_eq!(server_message(r#"{"message":"bad key"}"#).as_deref(), Some("bad key"));
        assert_eq!(
            server_message(r#"{"data":{"message":"quota exceeded"}}"#).as_deref(),
            Some("quota exceeded")
        );
        assert_eq!(server_message(r#"{"message":""}"#), None);
        assert_eq!(server_message("Internal Server Error"), None);
        assert_eq!(server_message(""), None);
    }

    #[tokio::test]
    async fn test_build_posts_camel_case_body() {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/api/projects/{id}/build", post(record_build))
            .route("/api/projects/{id}/crossbuild", post(record_cross_build))
            .with_state(recorded.clone());
        let base = serve(app).await;

        let service = HttpBuildService::new(format!("{base}/"), Duration::from_secs(5)).unwrap();
        service.build("bot", &build_request()).await.unwrap();
        service
            .cross_build(
                "bot",
                &CrossBuildRequest {
                    parent_lu: Vec::new(),
                    lu_files_to_merge: Vec::new(),
                },
            )
            .await
            .unwrap();

        let calls = recorded.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);

        let (action, id, body) = &calls[0];
        assert_eq!(action, "build");
        assert_eq!(id, "bot");
        assert_eq!(body["projectId"], "bot");
        assert_eq!(body["luisConfig"]["authoringKey"], "key");
        assert_eq!(body["luFiles"][0], json!({ "id": "main.en-us", "isEmpty": false }));

        let (action, _, body) = &calls[1];
        assert_eq!(action, "crossbuild");
        assert!(body.get("parentLU").is_some());
        assert!(body.get("luFilesToMerge").is_some());
    }

    #[tokio::test]
    async fn test_remote_failure_carries_server_message() {
        let app = Router::new().route(
            "/api/projects/{id}/build",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "LUIS authoring key is invalid" })),
                )
            }),
        );
        let base = serve(app).await;

        let service = HttpBuildService::new(base, Duration::from_secs(5)).unwrap();
        let err = service.build("bot", &build_request()).await.unwrap_err();
        match &err {
            BuildServiceError::Remote {
                status,
                server_message,
            } => {
                assert_eq!(*status, 400);
                assert_eq!(server_message.as_deref(), Some("LUIS authoring key is invalid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.user_message(), "LUIS authoring key is invalid");
    }

    #[tokio::test]
    async fn test_remote_failure_without_payload() {
        let app = Router::new().route(
            "/api/projects/{id}/build",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(app).await;

        let service = HttpBuildService::new(base, Duration::from_secs(5)).unwrap();
        let err = service.build("bot", &build_request()).await.unwrap_err();
        assert_eq!(err.user_message(), "build service returned HTTP 500");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service =
            HttpBuildService::new(format!("http://{addr}/api"), Duration::from_secs(5)).unwrap();
        let err = service.build("bot", &build_request()).await.unwrap_err();
        assert!(matches!(err, BuildServiceError::Transport(_)));
    }
}
