use super::{movie_from_args, AppContext};
use crate::output::{Output, OutputFormat};
use crate::MovieArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub fn run_add(ctx: &AppContext, movie: MovieArgs, output: &Output) -> Result<()> {
    let movie = movie_from_args(movie)?;
    let mut store = ctx.open_store(output)?;

    let Some(id) = movie.valid_id() else {
        return Err(eyre!("A movie id is required"));
    };

    if !store.add(&movie) {
        output.info(format!("Movie {} is already a favorite", id));
    }
    print_state(output, id, store.is_favorite(id));
    Ok(())
}

pub fn run_remove(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    let mut store = ctx.open_store(output)?;

    if !store.remove(id) {
        output.warn(format!("Movie {} is not a favorite", id));
    }
    print_state(output, id, store.is_favorite(id));
    Ok(())
}

pub fn run_toggle(ctx: &AppContext, movie: MovieArgs, output: &Output) -> Result<()> {
    let movie = movie_from_args(movie)?;
    let mut store = ctx.open_store(output)?;

    let Some(id) = movie.valid_id() else {
        return Err(eyre!("A movie id is required"));
    };

    store.toggle(&movie);
    print_state(output, id, store.is_favorite(id));
    Ok(())
}

pub fn run_check(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    let store = ctx.open_store(output)?;
    let favorite = store.is_favorite(id);

    match output.format() {
        OutputFormat::Human => match store.get(id) {
            Some(movie) => output.println(format!("\"{}\" ({}) is a favorite", movie.title, id)),
            None => output.println(format!("Movie {} is not a favorite", id)),
        },
        OutputFormat::Json | OutputFormat::JsonPretty => print_state(output, id, favorite),
    }
    Ok(())
}

pub fn run_clear(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut store = ctx.open_store(output)?;
    store.clear();

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "total": store.len() }));
    }
    Ok(())
}

/// Machine-readable state after a mutation; human mode relies on the notifications
fn print_state(output: &Output, id: u64, favorite: bool) {
    if output.format() != OutputFormat::Human {
        output.json(&json!({ "id": id, "favorite": favorite }));
    }
}
