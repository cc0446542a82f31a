use chrono::NaiveDate;
use favorites_models::{FavoriteMovie, SortCriterion, SortDirection};
use std::cmp::Ordering;

/// Case-insensitive substring match on title or overview. A blank term
/// returns everything in stored order.
pub fn search_favorites(favorites: &[FavoriteMovie], term: &str) -> Vec<FavoriteMovie> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return favorites.to_vec();
    }

    favorites
        .iter()
        .filter(|f| {
            f.title.to_lowercase().contains(&needle)
                || (!f.overview.is_empty() && f.overview.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Sorted copy of the favorites. Equal keys keep insertion order.
pub fn sort_favorites(
    favorites: &[FavoriteMovie],
    criterion: SortCriterion,
    direction: SortDirection,
) -> Vec<FavoriteMovie> {
    let mut sorted = favorites.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, criterion);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare(a: &FavoriteMovie, b: &FavoriteMovie, criterion: SortCriterion) -> Ordering {
    match criterion {
        SortCriterion::Title => compare_titles(&a.title, &b.title),
        SortCriterion::VoteAverage => a.vote_average.total_cmp(&b.vote_average),
        SortCriterion::ReleaseDate => release_or_epoch(a).cmp(&release_or_epoch(b)),
        SortCriterion::AddedAt => a.added_at.cmp(&b.added_at),
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn release_or_epoch(favorite: &FavoriteMovie) -> NaiveDate {
    favorite.release_day().unwrap_or_default()
}
