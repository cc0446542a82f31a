use crate::error::ExportError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receives a finished export file
pub trait Downloader {
    fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<(), ExportError>;
}

/// `<prefix>-YYYY-MM-DD.json`, dated by the UTC day of the export
pub fn export_file_name(prefix: &str, exported_at: DateTime<Utc>) -> String {
    format!("{}-{}.json", prefix, exported_at.format("%Y-%m-%d"))
}

/// Writes downloads into a directory on disk
pub struct DirectoryDownloader {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recent file written, if any
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl Downloader for DirectoryDownloader {
    fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(file_name);

        let temp_path = target.with_extension("json.tmp");
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &target)?;

        debug!("Wrote {} bytes to {:?}", contents.len(), target);
        self.last_written = Some(target);
        Ok(())
    }
}
