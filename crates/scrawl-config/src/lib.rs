//! Configuration for scrawl.
//!
//! Settings load from `~/.config/scrawl/config.toml` when present and fall
//! back to defaults otherwise. A few environment variables override the
//! file for scripting and tests.
//!
//! ```toml
//! [storage]
//! db_path = "~/notes/scrawl.db"
//!
//! [embedding]
//! base_url = "http://localhost:11434"
//! model = "nomic-embed-text"
//! timeout_secs = 30
//! ```
//!
//! # Environment Variables
//!
//! - `SCRAWL_DB_PATH` - Override the database file location
//! - `SCRAWL_OLLAMA_URL` - Override the embedding provider base URL
//! - `SCRAWL_EMBED_MODEL` - Override the embedding model name

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ─────────────────────────────────────────────────────────────────────────────
// Config types
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level scrawl configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrawlConfig {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file location.
    /// Default: `<platform data dir>/scrawl/notes.db`
    ///
    /// Can be overridden by the `SCRAWL_DB_PATH` environment variable.
    pub db_path: Option<PathBuf>,
}

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the Ollama-compatible provider.
    pub base_url: String,

    /// Embedding model name.
    pub model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            timeout_secs: 30,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading and resolution
// ─────────────────────────────────────────────────────────────────────────────

impl ScrawlConfig {
    /// Load configuration from the default location.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the effective database path.
    ///
    /// Resolution order:
    /// 1. `SCRAWL_DB_PATH` environment variable
    /// 2. Configured `storage.db_path` value
    /// 3. Default: `<platform data dir>/scrawl/notes.db`
    pub fn effective_db_path(&self) -> PathBuf {
        if let Ok(env_path) = std::env::var("SCRAWL_DB_PATH") {
            return PathBuf::from(env_path);
        }

        self.storage.db_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("scrawl")
                .join("notes.db")
        })
    }

    /// Get the effective provider base URL (env var wins).
    pub fn effective_base_url(&self) -> String {
        std::env::var("SCRAWL_OLLAMA_URL").unwrap_or_else(|_| self.embedding.base_url.clone())
    }

    /// Get the effective embedding model name (env var wins).
    pub fn effective_model(&self) -> String {
        std::env::var("SCRAWL_EMBED_MODEL").unwrap_or_else(|_| self.embedding.model.clone())
    }
}

/// Default config file location: `~/.config/scrawl/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scrawl").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ScrawlConfig::default();
        assert_eq!(config.embedding.base_url, "http://localhost:11434");
        assert_eq!(config.embedding.model, "nomic-embed-text");
        assert_eq!(config.embedding.timeout_secs, 30);
        assert!(config.storage.db_path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
            [storage]
            db_path = "/tmp/scrawl-test/notes.db"

            [embedding]
            model = "all-minilm"
            "#
        )
        .unwrap();

        let config = ScrawlConfig::load_from(&path).unwrap();
        assert_eq!(
            config.storage.db_path.as_deref(),
            Some(Path::new("/tmp/scrawl-test/notes.db"))
        );
        assert_eq!(config.embedding.model, "all-minilm");
        // Unset sections keep their defaults.
        assert_eq!(config.embedding.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(
            ScrawlConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
