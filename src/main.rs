//! Food finder - search restaurants by city from the console
//!
//! Prompts for a city and a food term, prints the matching businesses with
//! their reviews, charts, the local weather and a rating tree, and serves the
//! latest results as a web page.

use std::io::{self, Write};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use foodfinder::app::App;
use foodfinder::cache::{CacheStore, CachedClient, HttpTransport};
use foodfinder::cli::{Cli, Config};
use foodfinder::data::{WeatherClient, YelpClient};
use foodfinder::server::{self, PageState};
use foodfinder::ui::console::{self, AGAIN_PROMPT, CITY_PROMPT, TERM_PROMPT};
use foodfinder::ui::{parse_answer, Answer};

/// Sets up env_logger, letting `RUST_LOG` override the verbosity flag
fn init_logging(config: &Config) {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("foodfinder", config.log_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Prints a prompt and reads one answer
async fn ask(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> io::Result<Answer> {
    print!("{}", console::styled_prompt(prompt));
    io::stdout().flush()?;
    let line = lines.next_line().await?;
    Ok(parse_answer(line.as_deref()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    init_logging(&config);

    let store = CacheStore::at(&config.cache_file);
    log::debug!("using cache file {}", store.path().display());
    let yelp = YelpClient::new(CachedClient::new(HttpTransport::new(), store), &config.api_key)
        .with_base_url(&config.api_base);
    let weather = config.fetch_weather.then(WeatherClient::new);
    let mut app = App::new(yelp)
        .with_weather(weather)
        .with_reviews(config.fetch_reviews);

    let page_state = PageState::new();
    let server_handle = match config.serve_addr {
        Some(addr) => Some(server::spawn_server(addr, page_state.clone()).await?),
        None => None,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    let mut searched = false;
    loop {
        if searched && ask(&mut lines, AGAIN_PROMPT).await? == Answer::Quit {
            break;
        }

        let location = match ask(&mut lines, CITY_PROMPT).await? {
            Answer::Quit => break,
            Answer::Value(location) => location,
        };
        let term = match ask(&mut lines, TERM_PROMPT).await? {
            Answer::Quit => break,
            Answer::Value(term) => term,
        };

        match app.run_search(&location, &term, &mut stdout).await {
            Ok(report) => page_state.publish(report).await,
            Err(e) => log::error!("search for {} in {} failed: {}", term, location, e),
        }
        searched = true;
    }

    println!("\nBye!");

    if let Some(handle) = server_handle {
        handle.abort();
    }

    Ok(())
}
