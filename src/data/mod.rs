//! Core data models for the restaurant search
//!
//! Response shapes of the business-search API and the display rows derived
//! from them.

pub mod weather;
pub mod yelp;

pub use weather::{WeatherClient, WeatherError, WeatherSnippet};
pub use yelp::{YelpClient, YelpError};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a business search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub businesses: Vec<Business>,
}

/// A business returned by the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    /// Identifier used for the reviews lookup
    pub id: String,
    pub name: String,
    /// Average rating, 1.0 to 5.0 in half steps
    pub rating: f64,
    /// Price tier as a run of `$` characters, absent for many listings
    #[serde(default)]
    pub price: Option<String>,
    pub location: BusinessLocation,
    #[serde(default)]
    pub phone: String,
}

/// Location block of a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessLocation {
    /// Address lines ready for display
    #[serde(default)]
    pub display_address: Vec<String>,
}

/// Body of a reviews response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}

/// A single review of a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub user: Reviewer,
    pub rating: f64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reviewer {
    pub name: String,
}

/// Price tier of a business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceLevel {
    /// Number of `$` signs in the listing
    Level(usize),
    /// The listing has no price
    Unlisted,
}

impl PriceLevel {
    /// Maps an optional `$`-string to a price level
    pub fn from_price(price: Option<&str>) -> Self {
        match price {
            Some(p) => PriceLevel::Level(p.chars().count()),
            None => PriceLevel::Unlisted,
        }
    }

    /// Position on a chart axis, with `None` at zero
    pub fn axis_value(&self) -> f64 {
        match self {
            PriceLevel::Level(n) => *n as f64,
            PriceLevel::Unlisted => 0.0,
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceLevel::Level(n) => write!(f, "{}", n),
            PriceLevel::Unlisted => write!(f, "none"),
        }
    }
}

/// Coarse verdict for a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatingClass {
    DontGo,
    Average,
    Good,
    Great,
    Excellent,
}

impl RatingClass {
    /// All classes from worst to best
    pub const ALL: [RatingClass; 5] = [
        RatingClass::DontGo,
        RatingClass::Average,
        RatingClass::Good,
        RatingClass::Great,
        RatingClass::Excellent,
    ];

    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            RatingClass::Excellent
        } else if rating >= 4.0 {
            RatingClass::Great
        } else if rating >= 3.5 {
            RatingClass::Good
        } else if rating >= 3.0 {
            RatingClass::Average
        } else {
            RatingClass::DontGo
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingClass::Excellent => "excellent",
            RatingClass::Great => "great",
            RatingClass::Good => "good",
            RatingClass::Average => "average",
            RatingClass::DontGo => "don't go",
        }
    }

    /// Position on a chart axis, 0 for "don't go" up to 4 for "excellent"
    pub fn axis_value(&self) -> f64 {
        *self as u8 as f64
    }
}

/// Display row for one business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub rating: f64,
    /// Address lines joined with a space
    pub address: String,
    pub phone: String,
    pub price: PriceLevel,
}

impl From<&Business> for Listing {
    fn from(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            rating: business.rating,
            address: business.location.display_address.join(" "),
            phone: business.phone.clone(),
            price: PriceLevel::from_price(business.price.as_deref()),
        }
    }
}

impl Listing {
    pub fn rating_class(&self) -> RatingClass {
        RatingClass::from_rating(self.rating)
    }
}

/// Everything one search cycle produced
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub location: String,
    pub term: String,
    /// Weather snippet, if it was fetched
    pub weather: Option<WeatherSnippet>,
    pub listings: Vec<Listing>,
    /// When the search finished
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn business_json() -> serde_json::Value {
        json!({
            "id": "slice-ann-arbor",
            "name": "Slice",
            "rating": 4.5,
            "price": "$$",
            "location": {"display_address": ["123 Main St", "Ann Arbor, MI 48104"]},
            "phone": "+17345550100"
        })
    }

    #[test]
    fn test_business_deserializes_from_api_shape() {
        let business: Business = serde_json::from_value(business_json()).unwrap();

        assert_eq!(business.id, "slice-ann-arbor");
        assert_eq!(business.price.as_deref(), Some("$$"));
        assert_eq!(business.location.display_address.len(), 2);
    }

    #[test]
    fn test_listing_joins_address_lines() {
        let business: Business = serde_json::from_value(business_json()).unwrap();
        let listing = Listing::from(&business);

        assert_eq!(listing.address, "123 Main St Ann Arbor, MI 48104");
        assert_eq!(listing.price, PriceLevel::Level(2));
        assert_eq!(listing.phone, "+17345550100");
    }

    #[test]
    fn test_missing_price_maps_to_placeholder() {
        let mut value = business_json();
        value.as_object_mut().unwrap().remove("price");

        let business: Business = serde_json::from_value(value).unwrap();
        let listing = Listing::from(&business);

        assert_eq!(listing.price, PriceLevel::Unlisted);
        assert_eq!(listing.price.to_string(), "none");
        assert_eq!(listing.price.axis_value(), 0.0);
    }

    #[test]
    fn test_integer_rating_deserializes() {
        let mut value = business_json();
        value["rating"] = json!(4);

        let business: Business = serde_json::from_value(value).unwrap();
        assert_eq!(business.rating, 4.0);
    }

    #[test]
    fn test_search_response_without_businesses_fails() {
        let result: Result<SearchResponse, _> =
            serde_json::from_value(json!({"error": {"code": "VALIDATION_ERROR"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_rating_class_thresholds() {
        assert_eq!(RatingClass::from_rating(5.0), RatingClass::Excellent);
        assert_eq!(RatingClass::from_rating(4.5), RatingClass::Excellent);
        assert_eq!(RatingClass::from_rating(4.0), RatingClass::Great);
        assert_eq!(RatingClass::from_rating(3.5), RatingClass::Good);
        assert_eq!(RatingClass::from_rating(3.0), RatingClass::Average);
        assert_eq!(RatingClass::from_rating(2.5), RatingClass::DontGo);
        assert_eq!(RatingClass::from_rating(1.0), RatingClass::DontGo);
    }

    #[test]
    fn test_rating_class_axis_values_are_ordered() {
        let values: Vec<f64> = RatingClass::ALL.iter().map(|c| c.axis_value()).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(RatingClass::DontGo.label(), "don't go");
    }

    #[test]
    fn test_review_deserializes_from_api_shape() {
        let reviews: ReviewsResponse = serde_json::from_value(json!({
            "reviews": [{"user": {"name": "Sam"}, "rating": 5, "text": "Great crust."}]
        }))
        .unwrap();

        assert_eq!(reviews.reviews[0].user.name, "Sam");
        assert_eq!(reviews.reviews[0].rating, 5.0);
    }
}
