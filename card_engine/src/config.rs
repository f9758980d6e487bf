//! Engine configuration, read from TOML.
//!
//! ```toml
//! [favorites]
//! key = "favorites"
//! path = "/home/me/.local/share/question-cards/store.json"
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::favorites::DEFAULT_FAVORITES_KEY;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub favorites: FavoritesConfig,
}

/// Where and how favorites are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Key the JSON id list is stored under.
    pub key: String,

    /// Store file. Without one, favorites last for the session only.
    pub path: Option<PathBuf>,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_FAVORITES_KEY.to_string(),
            path: None,
        }
    }
}

impl EngineConfig {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is invalid.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}
