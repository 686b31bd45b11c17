//! QR Panel Core - controllers for a QR code generator and dashboard
//!
//! This library owns the UI state of the generator, dashboard and widget
//! views, talks to the QR backend, and renders escaped view trees for the
//! page to display.

pub mod animation;
pub mod client;
pub mod clipboard;
pub mod dashboard;
pub mod forms;
pub mod notify;
pub mod page;
pub mod protocol;
pub mod view;
pub mod widget;

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub use error::{Error, Result};

/// Configuration shared by the views
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the QR backend
    pub base_url: String,
    /// Upper bound on a backend request
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// How long notifications stay visible
    #[serde(with = "duration_millis")]
    pub notification_ttl: Duration,
    /// Fade-out played before a deleted card is removed
    #[serde(with = "duration_millis")]
    pub fade_out: Duration,
    /// Where downloads and exports are written
    pub download_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        use protocol::constants::*;

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            notification_ttl: Duration::from_millis(NOTIFICATION_TTL_MS),
            fade_out: Duration::from_millis(FADE_OUT_MS),
            download_dir: default_download_dir(),
        }
    }
}

impl Config {
    /// Load a JSON config file; absent keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// Re-export key types for convenience
pub use client::{HttpBackend, LocalBackend, QrBackend};
pub use dashboard::Dashboard;
pub use notify::{Notifications, Severity};
pub use page::{DashboardPage, GeneratorPage};
pub use protocol::{LogoImage, QrCard, QrId, QrImage, QrRequest, QrResult};
pub use widget::QrWidget;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.notification_ttl, Duration::from_secs(5));
        assert_eq!(config.fade_out, Duration::from_millis(300));
    }

    #[test]
    fn test_config_load_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrpanel.json");
        std::fs::write(
            &path,
            r#"{"base_url":"https://qr.example.com","request_timeout":5}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.base_url, "https://qr.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.fade_out, Duration::from_millis(300));
    }

    #[test]
    fn test_config_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Config::load(dir.path().join("missing.json")), Err(Error::Io(_))));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Serialization(_))));
    }
}
