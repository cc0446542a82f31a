use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use favorites_core::sort_favorites;
use favorites_models::{truncate_overview, FavoriteMovie, SortCriterion, SortDirection};
use owo_colors::OwoColorize;
use serde_json::json;

const OVERVIEW_PREVIEW: usize = 60;

pub fn run_list(
    ctx: &AppContext,
    search: Option<String>,
    sort: Option<String>,
    direction: Option<String>,
    output: &Output,
) -> Result<()> {
    let store = ctx.open_store(output)?;

    let criterion = sort.as_deref().map(SortCriterion::parse).unwrap_or_default();
    let direction = direction.as_deref().map(SortDirection::parse).unwrap_or_default();

    // Search first, then order what is left
    let movies = match search.as_deref() {
        Some(term) => sort_favorites(&store.search(term), criterion, direction),
        None => store.sort(criterion, direction),
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            if movies.is_empty() {
                match search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                    Some(term) => output.info(format!("No favorites match \"{}\"", term)),
                    None => output.info("No favorites yet"),
                }
                return Ok(());
            }
            println!("{}", favorites_table(&movies, &ctx.config.images.poster_base_url));
            println!("{}", format!("{} of {} favorites", movies.len(), store.len()).bright_black());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "total": store.len(),
                "count": movies.len(),
                "favorites": movies,
            }));
        }
    }
    Ok(())
}

fn favorites_table(movies: &[FavoriteMovie], poster_base_url: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Added").add_attribute(Attribute::Bold),
        Cell::new("Overview").add_attribute(Attribute::Bold),
        Cell::new("Poster").add_attribute(Attribute::Bold),
    ]);

    for movie in movies {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title).fg(Color::Cyan),
            Cell::new(movie.release_year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::new(format!("{:.1}", movie.vote_average)),
            Cell::new(movie.added_at.format("%Y-%m-%d").to_string()),
            Cell::new(truncate_overview(&movie.overview, OVERVIEW_PREVIEW)),
            Cell::new(movie.poster_url(poster_base_url).unwrap_or_else(|| "-".to_string())),
        ]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn run_stats(ctx: &AppContext, output: &Output) -> Result<()> {
    let store = ctx.open_store(output)?;
    let stats = store.statistics();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Favorites Statistics").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Total"), Cell::new(stats.total)]);
            table.add_row(vec![
                Cell::new("Average rating"),
                Cell::new(format!("{:.1}", stats.average_rating)),
            ]);
            table.add_row(vec![
                Cell::new("Top rated"),
                Cell::new(describe(stats.top_movie.as_ref(), |m| format!("{} ({:.1})", m.title, m.vote_average))),
            ]);
            table.add_row(vec![
                Cell::new("Most common year"),
                Cell::new(stats.most_common_year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())),
            ]);
            table.add_row(vec![
                Cell::new("Most recently added"),
                Cell::new(describe(stats.most_recently_added.as_ref(), |m| {
                    format!("{} ({})", m.title, m.added_at.format("%Y-%m-%d"))
                })),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!(stats));
        }
    }
    Ok(())
}

fn describe(movie: Option<&FavoriteMovie>, render: impl Fn(&FavoriteMovie) -> String) -> String {
    movie.map(render).unwrap_or_else(|| "-".to_string())
}
