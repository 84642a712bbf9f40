//! Weather snippet scraped from a search-results page
//!
//! The page is fetched with a browser User-Agent and three elements are read:
//! the day/time line, the condition text and the temperature in Celsius.

use reqwest::{Client, RequestBuilder};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the page carrying the weather card
const WEATHER_SEARCH_URL: &str = "https://www.google.com/search";

/// User-Agent sent so the page includes the weather card
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

const DAY_TIME_SELECTOR: &str = "#wob_dts";
const CONDITION_SELECTOR: &str = "#wob_dc";
const TEMPERATURE_SELECTOR: &str = "#wob_tm";

/// Current weather as shown on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnippet {
    /// Day and time line, e.g. "Monday 10:00 AM"
    pub day_time: String,
    /// Condition text, e.g. "Partly cloudy"
    pub condition: String,
    /// Temperature in Celsius as displayed
    pub temperature_c: String,
}

/// Errors that can occur when fetching the weather snippet
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The page no longer contains an expected element
    #[error("Weather element not found: {0}")]
    MissingElement(&'static str),
}

/// Client for fetching the weather snippet of a city
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient with default settings
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: WEATHER_SEARCH_URL.to_string(),
        }
    }

    /// Creates a WeatherClient pointed at another page (for testing)
    #[cfg(test)]
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Builds the page request for a city, with the query string encoded
    pub fn page_request(&self, city: &str) -> RequestBuilder {
        let query = format!("{} weather", city.trim());
        self.client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("oq", query.as_str()),
                ("sourceid", "chrome"),
                ("ie", "UTF-8"),
            ])
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
    }

    /// Fetch the weather snippet for a city
    ///
    /// # Returns
    /// * `Ok(WeatherSnippet)` - The extracted weather
    /// * `Err(WeatherError)` - If the request fails or the markup changed
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherSnippet, WeatherError> {
        log::debug!("fetching weather page for {}", city);

        let response = self.page_request(city).send().await?;
        let html = response.text().await?;

        parse_weather_page(&html)
    }
}

/// Extracts the weather snippet from a page
pub fn parse_weather_page(html: &str) -> Result<WeatherSnippet, WeatherError> {
    let document = Html::parse_document(html);

    Ok(WeatherSnippet {
        day_time: select_text(&document, DAY_TIME_SELECTOR)?,
        condition: select_text(&document, CONDITION_SELECTOR)?,
        temperature_c: select_text(&document, TEMPERATURE_SELECTOR)?,
    })
}

/// Returns the trimmed text of the first element matching `selector`
///
/// A selector that does not parse matches nothing.
fn select_text(document: &Html, selector: &'static str) -> Result<String, WeatherError> {
    let element = Selector::parse(selector)
        .ok()
        .and_then(|parsed| document.select(&parsed).next())
        .ok_or(WeatherError::MissingElement(selector))?;

    Ok(element.text().collect::<String>().trim().to_string())
}
