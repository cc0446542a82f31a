use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::favorite::{FavoriteMovie, SCHEMA_VERSION};
use crate::movie::MovieCandidate;

/// Appended to every non-empty overview in an export
pub const ELLIPSIS: &str = "...";

/// Document written by export and read back by import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub favorites: Vec<ExportedFavorite>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub total_count: usize,
    pub schema_version: String,
    pub app_tag: String,
}

/// Projection of a favorite kept in export files. Poster, genres and
/// popularity are not carried.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFavorite {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub rating: f64,
    pub language: String,
    pub added_at: DateTime<Utc>,
    pub overview: String,
}

impl ExportDocument {
    pub fn build(
        favorites: &[FavoriteMovie],
        exported_at: DateTime<Utc>,
        app_tag: &str,
        overview_limit: usize,
    ) -> Self {
        Self {
            metadata: ExportMetadata {
                exported_at,
                total_count: favorites.len(),
                schema_version: SCHEMA_VERSION.to_string(),
                app_tag: app_tag.to_string(),
            },
            favorites: favorites
                .iter()
                .map(|f| ExportedFavorite::project(f, overview_limit))
                .collect(),
        }
    }
}

impl ExportedFavorite {
    pub fn project(favorite: &FavoriteMovie, overview_limit: usize) -> Self {
        Self {
            id: favorite.id,
            title: favorite.title.clone(),
            release_date: favorite.release_date.clone(),
            rating: favorite.vote_average,
            language: favorite.original_language.clone(),
            added_at: favorite.added_at,
            overview: export_overview(&favorite.overview, overview_limit),
        }
    }
}

/// Overview as written to export files: the first `limit` characters followed
/// by an ellipsis, whether or not anything was cut. Empty stays empty.
pub fn export_overview(text: &str, limit: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let head: String = text.chars().take(limit).collect();
    format!("{}{}", head, ELLIPSIS)
}

/// Cut `text` to at most `limit` characters, marking the cut with an ellipsis
pub fn truncate_overview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// One entry of an import file.
///
/// Accepts both the current field names and the ones written by the
/// browser build (`titulo`, `fechaLanzamiento`, `puntuacion`, `idioma`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImportedFavorite {
    pub id: Option<u64>,
    #[serde(alias = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "releaseDate", alias = "fechaLanzamiento")]
    pub release_date: Option<String>,
    #[serde(alias = "puntuacion")]
    pub rating: Option<f64>,
    #[serde(alias = "idioma")]
    pub language: Option<String>,
    pub overview: Option<String>,
}

impl ImportedFavorite {
    /// Map back to a lookup record. Fields the export does not carry are left
    /// for the add path to default.
    pub fn into_candidate(self) -> MovieCandidate {
        MovieCandidate {
            id: self.id,
            title: self.title,
            poster_path: None,
            release_date: self.release_date,
            vote_average: Some(self.rating.unwrap_or(0.0)),
            overview: Some(self.overview.unwrap_or_default()),
            genre_ids: None,
            original_language: self.language,
            popularity: None,
        }
    }
}
