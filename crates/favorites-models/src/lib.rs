pub mod export;
pub mod favorite;
pub mod movie;
pub mod notification;
pub mod sort;

pub use export::{ExportDocument, ExportMetadata, ExportedFavorite, ImportedFavorite, export_overview, truncate_overview};
pub use favorite::{FavoriteMovie, DEFAULT_LANGUAGE, SCHEMA_VERSION, UNKNOWN_TITLE};
pub use movie::MovieCandidate;
pub use notification::NotificationKind;
pub use sort::{SortCriterion, SortDirection};
