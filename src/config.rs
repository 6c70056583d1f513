//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\history-enricher\config.toml
//! - macOS: ~/Library/Application Support/history-enricher/config.toml
//! - Linux: ~/.config/history-enricher/config.toml
//!
//! Every setting has a default, and the CLI layers environment variables and
//! flags on top (flag > env > file > default).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::enrichment::MAX_BATCH_SIZE;
use crate::enrichment::spotify::{DEFAULT_TOKEN_URL, DEFAULT_TRACKS_URL};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// Remote catalog endpoints
    pub api: ApiConfig,

    /// Input and output files
    pub files: FilesConfig,
}

/// API credentials (client-credentials grant)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Catalog endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Client-credentials token endpoint
    pub token_url: String,

    /// Batch track lookup endpoint
    pub tracks_url: String,

    /// Track IDs per lookup request (the catalog caps this at 50)
    pub batch_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            tracks_url: DEFAULT_TRACKS_URL.to_string(),
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

/// Input/output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Streaming-history export to read
    pub input: PathBuf,

    /// Enriched CSV to append to
    pub output: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("extended.csv"),
            output: PathBuf::from("extended-output.csv"),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("history-enricher"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if the file doesn't exist or can't be parsed.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    }
}

/// Load configuration from a specific file
///
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to a specific file
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[files]"));
        assert!(toml.contains("https://api.spotify.com/v1/tracks"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[credentials]
client_id = "my-id"

[api]
batch_size = 20
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.credentials.client_id, Some("my-id".to_string()));
        assert!(config.credentials.client_secret.is_none());
        assert_eq!(config.api.batch_size, 20);
        assert_eq!(config.api.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.files.input, PathBuf::from("extended.csv"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.api.tracks_url = "http://localhost:8080/v1/tracks".to_string();
        config.files.output = PathBuf::from("/data/out.csv");

        save_to(&config, &path).unwrap();
        let loaded = load_from(&path);

        assert_eq!(loaded.api.tracks_url, "http://localhost:8080/v1/tracks");
        assert_eq!(loaded.files.output, PathBuf::from("/data/out.csv"));
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [not toml").unwrap();

        let config = load_from(&path);

        assert_eq!(config.api.batch_size, MAX_BATCH_SIZE);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_from(Path::new("/nonexistent/history-enricher.toml"));
        assert!(config.credentials.client_id.is_none());
    }
}
