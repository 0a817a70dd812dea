use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

pub const CONFIG_FILE: &str = "slackkit.json";

pub const DEFAULT_AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Project-level settings read from `slackkit.json`. Every field is optional on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlackKitConfig {
    pub faces_dir: String,
    pub output_dir: String,
    pub avatar_service_url: String,
    pub download_delay_ms: u64,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for SlackKitConfig {
    fn default() -> Self {
        Self {
            faces_dir: "assets/faces".into(),
            output_dir: "src".into(),
            avatar_service_url: DEFAULT_AVATAR_SERVICE.into(),
            download_delay_ms: 100,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl SlackKitConfig {
    pub fn faces_path(&self, root: &Path) -> PathBuf {
        root.join(&self.faces_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Reads `slackkit.json`, falling back to defaults when it is missing or unreadable.
pub fn load_config(root: &Path) -> SlackKitConfig {
    let path = config_path(root);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return SlackKitConfig::default();
    };
    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {e}", path.display());
            SlackKitConfig::default()
        }
    }
}

pub fn save_config(root: &Path, config: &SlackKitConfig) -> Result<()> {
    let path = config_path(root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

pub fn save_download_delay(root: &Path, delay_ms: u64) -> Result<SlackKitConfig> {
    let mut config = load_config(root);
    config.download_delay_ms = delay_ms;
    save_config(root, &config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path());
        assert_eq!(config, SlackKitConfig::default());
        assert_eq!(config.faces_path(dir.path()), dir.path().join("assets/faces"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path(dir.path()), r#"{"outputDir": "web/src"}"#).unwrap();
        let config = load_config(dir.path());
        assert_eq!(config.output_dir, "web/src");
        assert_eq!(config.download_delay_ms, 100);
    }

    #[test]
    fn test_save_download_delay_persists() {
        let dir = tempfile::tempdir().unwrap();
        save_download_delay(dir.path(), 250).unwrap();
        let config = load_config(dir.path());
        assert_eq!(config.download_delay(), Duration::from_millis(250));
        assert_eq!(config.faces_dir, "assets/faces");
    }
}
