//! Command-line interface parsing for the food finder
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the validated startup configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use crate::cache::{CacheStore, CACHE_FILENAME};
use crate::data::yelp::DEFAULT_API_BASE;

/// Default port of the results page
pub const DEFAULT_PORT: u16 = 5000;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key on the command line or in the environment
    #[error("Missing API key: pass --api-key or set YELP_API_KEY")]
    MissingApiKey,

    /// The API base is not an http(s) URL
    #[error("Invalid API base URL: '{0}'")]
    InvalidApiBase(String),
}

/// Food finder - search restaurants by city with a local response cache
#[derive(Parser, Debug)]
#[command(name = "foodfinder")]
#[command(about = "Restaurant search with a response cache, charts, weather and a results page")]
#[command(version)]
pub struct Cli {
    /// Bearer token for the business-search API
    #[arg(long, env = "YELP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the business endpoints
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Path of the JSON response cache (defaults to the user cache directory)
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Port of the results page
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Do not serve the results page
    #[arg(long)]
    pub no_serve: bool,

    /// Skip the weather snippet
    #[arg(long)]
    pub no_weather: bool,

    /// Skip fetching reviews for each business
    #[arg(long)]
    pub no_reviews: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub cache_file: PathBuf,
    /// Address of the results page, `None` when serving is disabled
    pub serve_addr: Option<SocketAddr>,
    pub fetch_weather: bool,
    pub fetch_reviews: bool,
    pub log_level: LevelFilter,
}

/// Cache file in the user cache directory, or the working directory as fallback
pub fn default_cache_file() -> PathBuf {
    CacheStore::new()
        .map(|store| store.path().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(CACHE_FILENAME))
}

/// Maps the `-v` count to a log level
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with appropriate settings
    /// * `Err(CliError)` if the API key is missing or the base URL is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(CliError::MissingApiKey)?
            .to_string();

        if !(cli.api_base.starts_with("http://") || cli.api_base.starts_with("https://")) {
            return Err(CliError::InvalidApiBase(cli.api_base.clone()));
        }

        let serve_addr =
            (!cli.no_serve).then(|| SocketAddr::from((Ipv4Addr::LOCALHOST, cli.port)));

        Ok(Config {
            api_key,
            api_base: cli.api_base.clone(),
            cache_file: cli.cache_file.clone().unwrap_or_else(default_cache_file),
            serve_addr,
            fetch_weather: !cli.no_weather,
            fetch_reviews: !cli.no_reviews,
            log_level: log_level(cli.verbose),
        })
    }
}
