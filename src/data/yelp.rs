//! Business search API client
//!
//! Searches go through the request cache; review lookups are live calls made
//! one business at a time.

use serde_json::Value;
use thiserror::Error;

use super::{Review, ReviewsResponse, SearchResponse};
use crate::cache::{CachedClient, FetchError, Params, Transport, TransportError};

/// Default base URL of the business endpoints
pub const DEFAULT_API_BASE: &str = "https://api.yelp.com/v3/businesses";

/// Errors that can occur when talking to the business-search API
#[derive(Debug, Error)]
pub enum YelpError {
    /// Cached search failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Live review lookup failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body did not have the expected shape
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),
}

/// Client for the business search and review endpoints
#[derive(Debug)]
pub struct YelpClient<T> {
    cache: CachedClient<T>,
    base_url: String,
    headers: Params,
}

impl<T: Transport> YelpClient<T> {
    /// Creates a client authenticating with a bearer token
    pub fn new(cache: CachedClient<T>, api_key: &str) -> Self {
        let headers = Params::from([(
            "Authorization".to_string(),
            format!("Bearer {}", api_key),
        )]);
        Self {
            cache,
            base_url: DEFAULT_API_BASE.to_string(),
            headers,
        }
    }

    /// Overrides the base URL of the business endpoints
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub fn reviews_url(&self, business_id: &str) -> String {
        format!("{}/{}/reviews", self.base_url, business_id)
    }

    /// Re-reads the cache file so external edits are picked up
    pub fn reload_cache(&mut self) {
        self.cache.reload();
    }

    pub fn cache(&self) -> &CachedClient<T> {
        &self.cache
    }

    /// Searches businesses matching `term` in `location`, using the cache
    pub async fn search(&mut self, location: &str, term: &str) -> Result<SearchResponse, YelpError> {
        let params = Params::from([
            ("location".to_string(), location.to_string()),
            ("term".to_string(), term.to_string()),
        ]);
        let url = self.search_url();

        let body = self.cache.fetch(&url, &params, &self.headers).await?;
        decode(body)
    }

    /// Fetches the reviews of one business without caching
    pub async fn reviews(&self, business_id: &str) -> Result<Vec<Review>, YelpError> {
        let body = self
            .cache
            .transport()
            .get_json(&self.reviews_url(business_id), &Params::new(), &self.headers)
            .await?;
        let response: ReviewsResponse = decode(body)?;
        Ok(response.reviews)
    }
}

fn decode<R: serde::de::DeserializeOwned>(body: Value) -> Result<R, YelpError> {
    serde_json::from_value(body).map_err(YelpError::UnexpectedShape)
}
