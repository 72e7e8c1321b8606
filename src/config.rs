//! Configuration file handling.
//!
//! The tool reads a single JSON file (`droidflash.json` in the working
//! directory) with two sections: the datastore connection and tool
//! behavior. An absent file means built-in defaults apply; absent keys
//! within a present file fall back to defaults per-key. The loaded value
//! is constructed once in `main` and passed by reference into every
//! component that needs it - there is no ambient global.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub database: DatabaseConfig,
    pub tool: ToolSettings,
}

/// Datastore connection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Schema (database) name; created on startup if absent.
    pub schema: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            schema: "droidflash".to_string(),
        }
    }
}

/// Tool behavior section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Directory firmware archives are downloaded into and extracted under.
    pub downloads_dir: PathBuf,
    /// Client identifier sent with HTTP requests.
    pub user_agent: String,
    /// Delay between successive flash attempts, in milliseconds.
    pub flash_pacing_ms: u64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            downloads_dir: PathBuf::from("downloads"),
            user_agent: format!("droidflash/{}", env!("CARGO_PKG_VERSION")),
            flash_pacing_ms: 400,
        }
    }
}

impl ToolSettings {
    /// Pacing delay as a [`Duration`] for the flash sequencer.
    pub fn flash_pacing(&self) -> Duration {
        Duration::from_millis(self.flash_pacing_ms)
    }
}

impl ToolConfig {
    /// Default configuration file path, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "droidflash.json";

    /// Load configuration from a JSON file.
    ///
    /// A missing file is not an error: built-in defaults apply.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {:?}", path))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    #[allow(dead_code)] // API: used to write a starter config for the operator
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database.host.trim().is_empty() {
            anyhow::bail!("Database host must be specified");
        }
        if self.database.user.trim().is_empty() {
            anyhow::bail!("Database user must be specified");
        }
        if self.database.schema.trim().is_empty() {
            anyhow::bail!("Database schema must be specified");
        }
        if self.tool.downloads_dir.as_os_str().is_empty() {
            anyhow::bail!("Downloads directory must be specified");
        }
        if self.tool.user_agent.trim().is_empty() {
            anyhow::bail!("HTTP client identifier must be specified");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.tool.downloads_dir, PathBuf::from("downloads"));
        assert_eq!(config.tool.flash_pacing_ms, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nonexistent_file_uses_defaults() {
        let config = ToolConfig::load_from_file("/nonexistent/droidflash.json").unwrap();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.schema, "droidflash");
    }

    #[test]
    fn test_absent_keys_fall_back_per_key() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{ "database": { "host": "db.lab.local" } }"#)
            .unwrap();
        temp_file.flush().unwrap();

        let config = ToolConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.database.host, "db.lab.local");
        // Untouched keys keep their defaults
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.user, "root");
        assert_eq!(config.tool.flash_pacing_ms, 400);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();
        temp_file.flush().unwrap();

        let result = ToolConfig::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_save_load() {
        let mut original = ToolConfig::default();
        original.database.host = "10.0.0.5".to_string();
        original.database.password = "s3cret".to_string();
        original.tool.downloads_dir = PathBuf::from("/tmp/firmware");
        original.tool.flash_pacing_ms = 250;

        let temp_file = NamedTempFile::new().unwrap();
        original.save_to_file(temp_file.path()).unwrap();
        let loaded = ToolConfig::load_from_file(temp_file.path()).unwrap();

        assert_eq!(loaded.database.host, original.database.host);
        assert_eq!(loaded.database.password, original.database.password);
        assert_eq!(loaded.tool.downloads_dir, original.tool.downloads_dir);
        assert_eq!(loaded.tool.flash_pacing_ms, original.tool.flash_pacing_ms);
    }

    #[test]
    fn test_validation_empty_host() {
        let mut config = ToolConfig::default();
        config.database.host = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_user_agent() {
        let mut config = ToolConfig::default();
        config.tool.user_agent = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flash_pacing_duration() {
        let mut settings = ToolSettings::default();
        settings.flash_pacing_ms = 250;
        assert_eq!(settings.flash_pacing(), Duration::from_millis(250));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{ "tool": { "user_agent": "lab-agent", "future_key": 1 } }"#)
            .unwrap();
        temp_file.flush().unwrap();

        let config = ToolConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.tool.user_agent, "lab-agent");
    }
}
