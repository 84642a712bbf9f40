//! One search cycle: cached search, reviews, charts, weather and rating tree
//!
//! All console output of a cycle goes to the writer passed to `run_search`.

use std::io::Write;

use chrono::Utc;
use thiserror::Error;

use crate::cache::Transport;
use crate::data::{Listing, SearchReport, WeatherClient, WeatherError, YelpClient, YelpError};
use crate::tree::RatingTree;
use crate::ui::{self, console};

/// Errors that abort a search cycle
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Yelp(#[from] YelpError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Runs search cycles against the business API
pub struct App<T> {
    yelp: YelpClient<T>,
    /// Weather source, `None` when the snippet is disabled
    weather: Option<WeatherClient>,
    fetch_reviews: bool,
}

impl<T: Transport> App<T> {
    pub fn new(yelp: YelpClient<T>) -> Self {
        Self {
            yelp,
            weather: Some(WeatherClient::new()),
            fetch_reviews: true,
        }
    }

    /// Sets or disables the weather source
    pub fn with_weather(mut self, weather: Option<WeatherClient>) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_reviews(mut self, fetch_reviews: bool) -> Self {
        self.fetch_reviews = fetch_reviews;
        self
    }

    pub fn yelp(&self) -> &YelpClient<T> {
        &self.yelp
    }

    /// Runs one search and prints its results to `out`
    ///
    /// The cache file is re-read first so edits made between cycles are seen.
    /// Any network failure aborts the cycle.
    pub async fn run_search<W: Write>(
        &mut self,
        location: &str,
        term: &str,
        out: &mut W,
    ) -> Result<SearchReport, AppError> {
        self.yelp.reload_cache();
        let response = self.yelp.search(location, term).await?;

        let mut listings = Vec::with_capacity(response.businesses.len());
        for (index, business) in response.businesses.iter().enumerate() {
            let listing = Listing::from(business);
            writeln!(out, "{}", console::format_listing(index, &listing))?;
            listings.push(listing);

            if self.fetch_reviews {
                let reviews = self.yelp.reviews(&business.id).await?;
                writeln!(out, "{}", console::section_header("Reviews"))?;
                for review in &reviews {
                    writeln!(out, "{}\n", console::format_review(review))?;
                }
            }
        }

        if listings.is_empty() {
            writeln!(out, "No businesses found for {} in {}", term, location)?;
        }

        for line in ui::rating_bar_chart(&listings, location, ui::CHART_WIDTH, ui::CHART_HEIGHT) {
            writeln!(out, "{}", line)?;
        }
        for line in ui::price_rating_scatter(&listings, ui::CHART_WIDTH, ui::CHART_HEIGHT) {
            writeln!(out, "{}", line)?;
        }

        let weather = match &self.weather {
            Some(client) => {
                let snippet = client.fetch_weather(location).await?;
                writeln!(out, "{}", console::section_header("Weather information"))?;
                for line in console::format_weather(&snippet) {
                    writeln!(out, "{}", line)?;
                }
                Some(snippet)
            }
            None => None,
        };

        let ratings: Vec<f64> = listings.iter().map(|l| l.rating).collect();
        if let Some(tree) = RatingTree::build(&ratings) {
            writeln!(out, "Binary tree from list :\n{}", tree)?;
            writeln!(out, "List from binary tree : {:?}", tree.values())?;
        }

        Ok(SearchReport {
            location: location.to_string(),
            term: term.to_string(),
            weather,
            listings,
            generated_at: Utc::now(),
        })
    }
}
