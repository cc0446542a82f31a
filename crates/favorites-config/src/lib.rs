pub mod config;
pub mod paths;

pub use config::{Config, ExportConfig, ImageConfig, StorageConfig, default_favorites_key, default_legacy_key};
pub use paths::{PathManager, home_override};
