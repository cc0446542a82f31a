use serde::{Deserialize, Serialize};

/// Field a favorites listing is ordered by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortCriterion {
    Title,
    VoteAverage,
    ReleaseDate,
    #[default]
    AddedAt,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortCriterion {
    /// Parse a criterion name. Unknown names fall back to `AddedAt`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "title" => SortCriterion::Title,
            "voteaverage" | "rating" => SortCriterion::VoteAverage,
            "releasedate" => SortCriterion::ReleaseDate,
            _ => SortCriterion::AddedAt,
        }
    }
}

impl SortDirection {
    /// Anything other than `asc` sorts descending
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}
