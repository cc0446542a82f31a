use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, manage, transfer, AppContext};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cineshelf")]
#[command(about = "cineshelf - Keep your favorite movies close")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Movie fields accepted by `add` and `toggle`
#[derive(clap::Args, Debug, Clone)]
pub struct MovieArgs {
    /// TMDB movie id
    #[arg(long, required_unless_present = "json")]
    id: Option<u64>,

    #[arg(long)]
    title: Option<String>,

    /// Release date (YYYY-MM-DD)
    #[arg(long)]
    release_date: Option<String>,

    /// Average vote (0-10)
    #[arg(long)]
    vote_average: Option<f64>,

    #[arg(long)]
    overview: Option<String>,

    /// Poster path as returned by TMDB (e.g. /abc.jpg)
    #[arg(long)]
    poster_path: Option<String>,

    /// Comma-separated genre ids
    #[arg(long, value_delimiter = ',')]
    genre_ids: Option<Vec<u64>>,

    /// Original language code
    #[arg(long)]
    language: Option<String>,

    #[arg(long)]
    popularity: Option<f64>,

    /// Raw TMDB movie record as JSON (other flags override its fields)
    #[arg(long, value_name = "JSON")]
    json: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a movie to favorites
    Add {
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Remove a movie from favorites
    Remove {
        /// TMDB movie id
        id: u64,
    },
    /// Add the movie if it is not a favorite, remove it otherwise
    Toggle {
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Check whether a movie is a favorite
    Check {
        /// TMDB movie id
        id: u64,
    },
    /// List favorites, optionally filtered and sorted
    #[command(long_about = "List favorites. --search filters on title and overview (case-insensitive). --sort accepts title, voteAverage, releaseDate or addedAt (default); --direction accepts asc or desc (default).")]
    List {
        /// Only show movies whose title or overview contains this text
        #[arg(long)]
        search: Option<String>,

        /// Sort criterion
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction
        #[arg(long)]
        direction: Option<String>,
    },
    /// Show statistics about the collection
    Stats,
    /// Remove every favorite
    Clear,
    /// Export favorites to a JSON file
    Export {
        /// Directory to write into (defaults to the data directory's exports folder)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Import favorites from an exported JSON file
    Import {
        /// File produced by `cineshelf export`
        file: PathBuf,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration and file locations
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext::load(cli.config)?;

    match cli.command {
        Commands::Add { movie } => manage::run_add(&ctx, movie, &output),
        Commands::Remove { id } => manage::run_remove(&ctx, id, &output),
        Commands::Toggle { movie } => manage::run_toggle(&ctx, movie, &output),
        Commands::Check { id } => manage::run_check(&ctx, id, &output),
        Commands::List { search, sort, direction } => browse::run_list(&ctx, search, sort, direction, &output),
        Commands::Stats => browse::run_stats(&ctx, &output),
        Commands::Clear => manage::run_clear(&ctx, &output),
        Commands::Export { dir } => transfer::run_export(&ctx, dir, &output),
        Commands::Import { file } => transfer::run_import(&ctx, file, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config::show_config(&ctx, &output),
            ConfigCommands::Init { force } => config::init_config(&ctx, force, &output),
        },
    }
}
