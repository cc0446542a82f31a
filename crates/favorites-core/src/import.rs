use crate::error::ImportError;
use async_trait::async_trait;
use favorites_models::{ImportedFavorite, MovieCandidate};
use serde_json::Value;
use std::path::PathBuf;
use tracing::warn;

/// A file handed over for import. Reading it is the only suspension point of
/// an import.
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// Display name used in log lines
    fn name(&self) -> &str;

    async fn read_to_string(&self) -> std::io::Result<String>;
}

/// Import file on disk
pub struct FileImport {
    path: PathBuf,
    name: String,
}

impl FileImport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl ImportSource for FileImport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_to_string(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// Import contents already held in memory
pub struct TextImport {
    name: String,
    contents: String,
}

impl TextImport {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

#[async_trait]
impl ImportSource for TextImport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_to_string(&self) -> std::io::Result<String> {
        Ok(self.contents.clone())
    }
}

/// Parse an import document into lookup records.
///
/// The document must carry a `favorites` array (`favoritos` in files written
/// by the browser build). Entries that are not objects in the expected shape
/// are skipped.
pub fn parse_import_document(text: &str) -> Result<Vec<MovieCandidate>, ImportError> {
    let document: Value = serde_json::from_str(text)?;

    let entries = document
        .get("favorites")
        .or_else(|| document.get("favoritos"))
        .and_then(Value::as_array)
        .ok_or(ImportError::InvalidFormat)?;

    let candidates = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            if !entry.is_object() {
                warn!("Skipping import entry {}: not an object", idx);
                return None;
            }
            match serde_json::from_value::<ImportedFavorite>(entry.clone()) {
                Ok(imported) => Some(imported.into_candidate()),
                Err(e) => {
                    warn!("Skipping import entry {}: {}", idx, e);
                    None
                }
            }
        })
        .collect();

    Ok(candidates)
}
