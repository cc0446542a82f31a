use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub images: ImageConfig,
}

/// Keys the favorites live under in the key-value store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    /// Older payload format, migrated once and then deleted
    #[serde(default = "default_legacy_key")]
    pub legacy_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_app_tag")]
    pub app_tag: String,
    /// Maximum overview length (in characters) kept in export files
    #[serde(default = "default_overview_limit")]
    pub overview_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageConfig {
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,
}

pub fn default_favorites_key() -> String {
    "moviesFavoritos".to_string()
}

pub fn default_legacy_key() -> String {
    "peliculasFavoritas".to_string()
}

fn default_file_prefix() -> String {
    "my-favorite-movies".to_string()
}

fn default_app_tag() -> String {
    "cineshelf".to_string()
}

fn default_overview_limit() -> usize {
    200
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w342".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            favorites_key: default_favorites_key(),
            legacy_key: default_legacy_key(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            app_tag: default_app_tag(),
            overview_limit: default_overview_limit(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            poster_base_url: default_poster_base_url(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.storage.favorites_key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.favorites_key cannot be empty"));
        }
        if self.storage.legacy_key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.legacy_key cannot be empty"));
        }
        if self.storage.favorites_key == self.storage.legacy_key {
            return Err(anyhow::anyhow!("storage.favorites_key and storage.legacy_key must differ"));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(anyhow::anyhow!("export.file_prefix cannot be empty"));
        }
        if self.export.file_prefix.contains(['/', '\\']) {
            return Err(anyhow::anyhow!("export.file_prefix must not contain path separators"));
        }
        if self.export.overview_limit == 0 {
            return Err(anyhow::anyhow!("export.overview_limit must be greater than zero"));
        }
        Ok(())
    }
}
