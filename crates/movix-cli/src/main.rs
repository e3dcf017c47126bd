//! movix - browse movies and TV shows from TMDB.

/// Application configuration (TOML).
mod config;
/// Tracing subscriber setup.
mod logging;
/// Discovery pages.
mod pages;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use movix_api::tmdb::{DiscoverParams, MediaType, SortBy, TimeWindow, TmdbClient};
use tracing::instrument;

use crate::config::{AppConfig, Mode, resolve_config_path};
use crate::pages::Pages;

/// Fallback shown for any failure that reaches the top level.
const FAILURE_MESSAGE: &str = "Something went wrong.";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Hero banner plus trending, popular and top-rated carousels.
    Home,
    /// Trending movies.
    Trending(TrendingArgs),
    /// Popular movies or TV shows.
    Popular(MediaArgs),
    /// Top-rated movies or TV shows.
    TopRated(MediaArgs),
    /// Search movies and TV shows.
    Search(SearchArgs),
    /// Browse by genre with a sort order.
    Explore(ExploreArgs),
    /// Details, cast, videos, similar titles and recommendations.
    Details(DetailsArgs),
    /// List movie and TV genres.
    Genres,
}

/// Arguments for the `trending` subcommand.
#[derive(clap::Args)]
struct TrendingArgs {
    /// Time window ("day" or "week").
    #[arg(long, default_value = "day")]
    window: TimeWindow,
}

/// Arguments for the `popular` and `top-rated` subcommands.
#[derive(clap::Args)]
struct MediaArgs {
    /// Media type ("movie" or "tv").
    #[arg(long, default_value = "movie")]
    media: MediaType,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Number of result pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Arguments for the `explore` subcommand.
#[derive(clap::Args)]
struct ExploreArgs {
    /// Media type ("movie" or "tv").
    #[arg(long, required = true)]
    media: MediaType,
    /// Comma-separated genre IDs (e.g. "28,35").
    #[arg(long, value_delimiter = ',')]
    genres: Vec<u32>,
    /// Sort order (e.g. "popularity.desc", "vote_average.desc").
    #[arg(long)]
    sort_by: Option<SortBy>,
    /// Number of result pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// Media type ("movie" or "tv").
    #[arg(long, required = true)]
    media: MediaType,
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Builds a `TmdbClient` from `TMDB_API_TOKEN` and the config file.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set, the configured base URL
/// is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!("movix/", env!("CARGO_PKG_VERSION")))
        .retry_policy(config.retry.policy());
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }
    if let Some(language) = config.api.language.as_deref() {
        builder = builder.language(language);
    }
    if let Some(region) = config.api.region.as_deref() {
        builder = builder.region(region);
    }
    builder.build().context("failed to build TMDB client")
}

/// Runs one subcommand.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the page fails.
async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;
    let pages = Pages::load(client).await;

    match command {
        Commands::Home => pages.home().await,
        Commands::Trending(args) => pages.trending(args.window).await,
        Commands::Popular(args) => pages.popular(args.media).await,
        Commands::TopRated(args) => pages.top_rated(args.media).await,
        Commands::Search(args) => pages.search(&args.query, args.pages).await,
        Commands::Explore(args) => {
            let mut params = DiscoverParams::default().with_genres(args.genres);
            if let Some(sort) = args.sort_by {
                params = params.sort_by(sort);
            }
            pages.explore(args.media, params, args.pages).await
        }
        Commands::Details(args) => pages.details(args.media, args.id).await,
        Commands::Genres => {
            pages.genres();
            Ok(())
        }
    }
}

/// Logs a failure that reached the top level.
fn report_failure(error: &anyhow::Error) {
    tracing::error!("{FAILURE_MESSAGE}");
    tracing::error!("{error:#}");
}

/// Entry point.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = resolve_config_path(cli.dir.as_ref()).and_then(|path| AppConfig::load(&path));
    let configured = config
        .as_ref()
        .map_or(Mode::default(), |config| config.app.mode);
    let mode = Mode::resolve(std::env::var("MOVIX_MODE").ok().as_deref(), configured);
    logging::init(mode);

    let result = match config {
        Ok(config) => run(cli.command, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
