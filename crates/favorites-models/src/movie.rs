use serde::{Deserialize, Serialize};

/// Raw movie record as handed over by the movie lookup (TMDB field names).
///
/// Every field is optional so partial records from search results, detail
/// pages or older stored payloads all deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovieCandidate {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub overview: Option<String>,
    pub genre_ids: Option<Vec<u64>>,
    pub original_language: Option<String>,
    pub popularity: Option<f64>,
}

impl MovieCandidate {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_vote_average(mut self, vote_average: f64) -> Self {
        self.vote_average = Some(vote_average);
        self
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    /// The id if it can key a favorite (present and non-zero)
    pub fn valid_id(&self) -> Option<u64> {
        self.id.filter(|id| *id != 0)
    }

    /// Whether the record carries a usable title (legacy migration requires one)
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}
