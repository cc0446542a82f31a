use favorites_models::FavoriteMovie;
use serde::Serialize;
use std::collections::BTreeMap;

/// Figures derived from the collection. Computed fresh on every request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FavoritesStatistics {
    pub total: usize,
    /// Mean vote average, rounded to one decimal
    pub average_rating: f64,
    pub top_movie: Option<FavoriteMovie>,
    pub most_common_year: Option<i32>,
    pub most_recently_added: Option<FavoriteMovie>,
}

impl FavoritesStatistics {
    pub fn empty() -> Self {
        Self {
            total: 0,
            average_rating: 0.0,
            top_movie: None,
            most_common_year: None,
            most_recently_added: None,
        }
    }

    pub fn compute(favorites: &[FavoriteMovie]) -> Self {
        if favorites.is_empty() {
            return Self::empty();
        }

        let sum: f64 = favorites.iter().map(|f| f.vote_average).sum();
        let average_rating = round_one_decimal(sum / favorites.len() as f64);

        Self {
            total: favorites.len(),
            average_rating,
            top_movie: first_max_by(favorites, |a, b| a.vote_average > b.vote_average).cloned(),
            most_common_year: most_common_year(favorites),
            most_recently_added: first_max_by(favorites, |a, b| a.added_at > b.added_at).cloned(),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scan in order, only replacing the current best on a strictly better entry,
/// so the first of equal entries wins.
fn first_max_by<F>(favorites: &[FavoriteMovie], better: F) -> Option<&FavoriteMovie>
where
    F: Fn(&FavoriteMovie, &FavoriteMovie) -> bool,
{
    favorites.iter().fold(None, |best, current| match best {
        Some(b) if !better(current, b) => Some(b),
        _ => Some(current),
    })
}

/// Release year seen most often. Ties go to the most recent year.
fn most_common_year(favorites: &[FavoriteMovie]) -> Option<i32> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in favorites.iter().filter_map(FavoriteMovie::release_year) {
        *counts.entry(year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by_key(|(year, count)| (*count, *year))
        .map(|(year, _)| year)
}
