//! Configuration handling for digilib
//!
//! Configuration is read from `~/.config/digilib/config.toml` (or the
//! platform equivalent), or from an explicit path. Every key is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::codec::Codec;
use super::file::LibraryFile;
use crate::domain::Limits;

/// Data file used when neither the command line nor the config names one
pub const DEFAULT_DATA_FILE: &str = "library.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library file; relative paths resolve against the working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Line format of the library file
    pub format: Codec,

    /// Maximum number of books
    pub capacity: usize,

    /// Maximum title length in characters
    pub title_max: usize,

    /// Maximum author length in characters
    pub author_max: usize,
}

impl Default for Config {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            data_file: None,
            format: Codec::default(),
            capacity: limits.capacity,
            title_max: limits.title_max,
            author_max: limits.author_max,
        }
    }
}

impl Config {
    /// Returns the default config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "digilib", "digilib")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Size limits for the library
    pub fn limits(&self) -> Limits {
        Limits {
            capacity: self.capacity,
            title_max: self.title_max,
            author_max: self.author_max,
        }
    }

    /// Resolves the library file path; `override_path` wins over the config
    pub fn data_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Builds the library file described by this configuration
    pub fn library_file(&self, override_path: Option<&Path>) -> LibraryFile {
        LibraryFile::new(self.data_path(override_path), self.format, self.limits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.format, Codec::Legacy);
        assert_eq!(config.limits(), Limits::default());
        assert_eq!(config.data_path(None), PathBuf::from("library.txt"));
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
data_file = "/tmp/books.jsonl"
format = "jsonl"
capacity = 500
title_max = 120
author_max = 80
"#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.format, Codec::Jsonl);
        assert_eq!(
            config.limits(),
            Limits {
                capacity: 500,
                title_max: 120,
                author_max: 80
            }
        );
        assert_eq!(config.data_path(None), PathBuf::from("/tmp/books.jsonl"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::from_toml("capacity = 3").unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.title_max, 59);
        assert_eq!(config.format, Codec::Legacy);
    }

    #[test]
    fn override_path_wins() {
        let config = Config::from_toml("data_file = \"from-config.txt\"").unwrap();
        let path = config.data_path(Some(Path::new("flag.txt")));
        assert_eq!(path, PathBuf::from("flag.txt"));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = Config::from_toml("capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_toml() {
        let err = Config::from_toml("format = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "format = \"jsonl\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.library_file(None).codec(), Codec::Jsonl);
    }
}
