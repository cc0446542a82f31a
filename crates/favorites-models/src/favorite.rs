use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::MovieCandidate;

/// Schema tag stamped on every stored favorite, reserved for future migrations
pub const SCHEMA_VERSION: &str = "1.0";

/// Title used when the lookup did not provide one
pub const UNKNOWN_TITLE: &str = "Unknown title";

pub const DEFAULT_LANGUAGE: &str = "en";

/// A movie the user saved locally.
///
/// `added_at` and `schema_version` accept the field names written by the
/// browser build (`fechaAgregada`, `version`) so old payloads still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteMovie {
    pub id: u64,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default = "default_language")]
    pub original_language: String,
    #[serde(default)]
    pub popularity: f64,
    /// Records stored without a timestamp count as added at the Unix epoch
    #[serde(alias = "fechaAgregada", default)]
    pub added_at: DateTime<Utc>,
    #[serde(alias = "version", default = "default_schema_version")]
    pub schema_version: String,
}

fn default_title() -> String {
    UNKNOWN_TITLE.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Blank strings count as missing, the same as an absent field
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn partial_date(raw: &str) -> Option<NaiveDate> {
    let (year, month) = match raw.split_once('-') {
        Some((year, month)) => (year, month.parse::<u32>().ok()?),
        None => (raw, 1),
    };
    if year.len() != 4 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

impl FavoriteMovie {
    /// Normalize a raw record into a favorite. Returns `None` when the
    /// candidate has no usable id.
    pub fn from_candidate(candidate: &MovieCandidate, added_at: DateTime<Utc>) -> Option<Self> {
        let id = candidate.valid_id()?;
        Some(Self {
            id,
            title: non_blank(&candidate.title).unwrap_or_else(default_title),
            poster_path: non_blank(&candidate.poster_path),
            release_date: non_blank(&candidate.release_date),
            vote_average: candidate.vote_average.filter(|v| v.is_finite()).unwrap_or(0.0),
            overview: candidate.overview.clone().unwrap_or_default(),
            genre_ids: candidate.genre_ids.clone().unwrap_or_default(),
            original_language: non_blank(&candidate.original_language).unwrap_or_else(default_language),
            popularity: candidate.popularity.filter(|v| v.is_finite()).unwrap_or(0.0),
            added_at,
            schema_version: default_schema_version(),
        })
    }

    /// Release date as a calendar day, if it parses. `YYYY` and `YYYY-MM`
    /// count from the first day of that year or month.
    pub fn release_day(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?.trim();
        // Accept full timestamps too, only the date part matters
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .ok()
            .or_else(|| partial_date(raw))
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_day().map(|d| d.year())
    }

    /// Full poster URL for the given image base, `None` without a poster
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        let path = self.poster_path.as_deref()?;
        let base = image_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            Some(format!("{}{}", base, path))
        } else {
            Some(format!("{}/{}", base, path))
        }
    }
}
