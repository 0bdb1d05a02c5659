//! User-facing notifications raised by background operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default time a notification stays visible.
pub const DEFAULT_RETENTION_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
    /// How long the UI keeps it on screen; `None` means until dismissed.
    pub retention_ms: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            description: description.into(),
            kind,
            retention_ms: None,
            created_at: Utc::now(),
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, title, description)
    }

    pub fn with_retention(mut self, retention_ms: u64) -> Self {
        self.retention_ms = Some(retention_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_builder() {
        let n = Notification::warning("Luis build warning", "locale \"xx-yy\" is not supported by LUIS")
            .with_retention(DEFAULT_RETENTION_MS);
        assert_eq!(n.kind, NotificationKind::Warning);
        assert_eq!(n.retention_ms, Some(5_000));
        assert!(n.description.contains("xx-yy"));
    }
}
