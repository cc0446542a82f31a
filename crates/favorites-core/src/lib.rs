pub mod download;
pub mod error;
pub mod import;
pub mod notify;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;

pub use download::{DirectoryDownloader, Downloader, export_file_name};
pub use error::{ExportError, ImportError, StorageError};
pub use import::{FileImport, ImportSource, TextImport};
pub use notify::{Notifier, TracingNotifier};
pub use query::{search_favorites, sort_favorites};
pub use stats::FavoritesStatistics;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::FavoritesStore;
