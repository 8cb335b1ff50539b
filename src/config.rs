use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::tone::Tone;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Service
    pub api_base: String,
    pub model: String,

    // Correction defaults
    pub default_tone: Tone,
    pub explain_by_default: bool,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            default_tone: Tone::Neutral,
            explain_by_default: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load config, backing up a corrupt file and falling back to defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        match Self::read_from(config_path) {
            Ok(config) => Ok(config),
            Err(e) if e.is::<serde_json::Error>() => Ok(Self::recover(config_path, &e)),
            Err(e) => Err(e),
        }
    }

    /// Parse the config without touching the file. A missing file yields
    /// defaults; a corrupt one is an error.
    pub fn read_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Move an unreadable config aside and use defaults
    pub fn recover(config_path: &Path, err: &anyhow::Error) -> Self {
        tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", err);
        // Backup corrupt file for debugging
        let backup_path = config_path.with_extension("json.corrupt");
        let _ = std::fs::rename(config_path, &backup_path);
        Self::default()
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("polish")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.default_tone, Tone::Neutral);
        assert!(!config.explain_by_default);
        assert_eq!(config.log_level, "INFO");
        assert!(config.api_base.starts_with("https://generativelanguage"));
    }

    #[test]
    fn test_config_roundtrip_on_disk() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested/config.json");

        let config = Config {
            model: "gemini-2.0-flash".to_string(),
            default_tone: Tone::Formal,
            ..Config::default()
        };
        config.save_to(&path).expect("Failed to save");

        let restored = Config::load_from(&path).expect("Failed to load");
        assert_eq!(restored.model, "gemini-2.0-flash");
        assert_eq!(restored.default_tone, Tone::Formal);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let restored: Config = serde_json::from_str(r#"{"model":"custom"}"#).unwrap();
        assert_eq!(restored.model, "custom");
        assert_eq!(restored.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_corrupt_config_is_backed_up() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let config = Config::load_from(&path).expect("Corrupt config should degrade");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!path.exists());
        assert!(dir.path().join("config.json.corrupt").exists());
    }

    #[test]
    fn test_read_leaves_corrupt_file_in_place() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let err = Config::read_from(&path).unwrap_err();
        assert!(err.is::<serde_json::Error>());
        assert!(path.exists());
        assert!(!dir.path().join("config.json.corrupt").exists());
    }

    #[test]
    fn test_recover_warns_through_installed_subscriber() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let err = Config::read_from(&path).unwrap_err();
        let config = tracing::subscriber::with_default(subscriber, || Config::recover(&path, &err));

        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(dir.path().join("config.json.corrupt").exists());
        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"), "log was: {}", logged);
        assert!(logged.contains("Config file corrupted"), "log was: {}", logged);
    }
}
