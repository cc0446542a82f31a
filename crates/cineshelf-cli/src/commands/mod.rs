pub mod browse;
pub mod config;
pub mod manage;
pub mod transfer;

use crate::output::Output;
use crate::MovieArgs;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use favorites_config::{Config, PathManager};
use favorites_core::{FavoritesStore, FileStore};
use favorites_models::MovieCandidate;
use std::path::PathBuf;
use tracing::debug;

/// Paths and configuration shared by every command
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub config_path: PathBuf,
}

impl AppContext {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let paths = PathManager::default();
        let config_path = config_override.unwrap_or_else(|| paths.config_file());

        // Validated when a store is opened, so `config init --force` can still
        // replace a broken file
        let config = Config::load_or_default(&config_path)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
        debug!("Using config {:?}, data under {:?}", config_path, paths.data_dir());

        Ok(Self { paths, config, config_path })
    }

    /// Open the favorites store backed by the data directory, reporting through `output`
    pub fn open_store(&self, output: &Output) -> Result<FavoritesStore> {
        if let Err(e) = self.config.validate() {
            output.error(format!("Validation error: {}", e));
            return Err(eyre!("Invalid config {}", self.config_path.display()));
        }

        self.paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create data directories: {}", e))?;

        let store_file = self.paths.store_file();
        debug!("Opening favorites store at {:?}", store_file);
        let storage = FileStore::open(&store_file)
            .wrap_err_with(|| format!("Failed to open favorites store at {}", store_file.display()))?;

        Ok(FavoritesStore::open(Box::new(storage), Box::new(*output), &self.config))
    }
}

/// Build a lookup record from flags, starting from `--json` when given
pub fn movie_from_args(args: MovieArgs) -> Result<MovieCandidate> {
    let mut movie = match args.json.as_deref() {
        Some(raw) => serde_json::from_str::<MovieCandidate>(raw).wrap_err("Invalid --json movie record")?,
        None => MovieCandidate::default(),
    };

    if args.id.is_some() {
        movie.id = args.id;
    }
    if args.title.is_some() {
        movie.title = args.title;
    }
    if args.release_date.is_some() {
        movie.release_date = args.release_date;
    }
    if args.vote_average.is_some() {
        movie.vote_average = args.vote_average;
    }
    if args.overview.is_some() {
        movie.overview = args.overview;
    }
    if args.poster_path.is_some() {
        movie.poster_path = args.poster_path;
    }
    if args.genre_ids.is_some() {
        movie.genre_ids = args.genre_ids;
    }
    if args.language.is_some() {
        movie.original_language = args.language;
    }
    if args.popularity.is_some() {
        movie.popularity = args.popularity;
    }

    Ok(movie)
}
