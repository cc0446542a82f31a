use thiserror::Error;

/// Faults raised by a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode storage file: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to decode storage file: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { key: String, needed: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read import file: {0}")]
    Read(#[source] std::io::Error),

    #[error("import file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid import format: expected a `favorites` array")]
    InvalidFormat,
}
