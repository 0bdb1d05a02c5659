//! Configuration loader for Composer.
//!
//! Reads `config.toml` from the data directory (`~/.composer/` in production)
//! and deserializes it into [`ComposerConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use composer_types::config::ComposerConfig;

/// Shortest build-service timeout honoured; builds routinely take seconds.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `COMPOSER_DATA_DIR` environment variable
/// 2. `~/.composer`
/// 3. `./.composer`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COMPOSER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".composer");
    }

    PathBuf::from(".composer")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ComposerConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> ComposerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ComposerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ComposerConfig::default();
        }
    };

    match toml::from_str::<ComposerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ComposerConfig::default()
        }
    }
}

/// Build-service round-trip timeout, never below five seconds.
pub fn request_timeout(config: &ComposerConfig) -> Duration {
    Duration::from_secs(config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
}
