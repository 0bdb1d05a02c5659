//! Global configuration types for Composer.
//!
//! `ComposerConfig` represents the top-level `config.toml` that controls how
//! the build service is reached, which locales the language-understanding
//! engine accepts, and the credentials forwarded with every build.

use serde::{Deserialize, Serialize};

use crate::build::{LuisConfig, QnaConfig};
use crate::notification::DEFAULT_RETENTION_MS;

/// Top-level configuration for the authoring tool.
///
/// Loaded from `~/.composer/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Base URL of the build service (`{url}/projects/{id}/build`).
    #[serde(default = "default_build_service_url")]
    pub build_service_url: String,

    /// Timeout for a single build-service round trip.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Overrides the built-in list of locales the LU engine supports.
    #[serde(default)]
    pub supported_locales: Option<Vec<String>>,

    /// How long build warnings stay visible.
    #[serde(default = "default_notification_retention_ms")]
    pub notification_retention_ms: u64,

    #[serde(default)]
    pub luis: LuisConfig,

    #[serde(default)]
    pub qna: QnaConfig,
}

fn default_build_service_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_notification_retention_ms() -> u64 {
    DEFAULT_RETENTION_MS
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            build_service_url: default_build_service_url(),
            request_timeout_secs: default_request_timeout_secs(),
            supported_locales: None,
            notification_retention_ms: default_notification_retention_ms(),
            luis: LuisConfig::default(),
            qna: QnaConfig::default(),
        }
    }
}
