//! Console prompts and result formatting

use crossterm::style::Stylize;

use crate::data::{Listing, Review, WeatherSnippet};

/// Answer that ends the session
pub const QUIT_SENTINEL: &str = "exit";

pub const CITY_PROMPT: &str = "which city do you want to eat? or 'exit' to quit: ";
pub const TERM_PROMPT: &str = "what kind of food you want to eat? or 'exit' to quit: ";
/// Asked after every search; any answer but the sentinel starts a new one
pub const AGAIN_PROMPT: &str = "another search term? then 'yes' or exit: ";

/// A line typed at a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Quit,
    Value(String),
}

/// Interprets a prompt answer; end of input counts as quitting
pub fn parse_answer(line: Option<&str>) -> Answer {
    match line.map(str::trim) {
        None => Answer::Quit,
        Some(QUIT_SENTINEL) => Answer::Quit,
        Some(value) => Answer::Value(value.to_string()),
    }
}

pub fn styled_prompt(prompt: &str) -> String {
    prompt.bold().to_string()
}

pub fn section_header(title: &str) -> String {
    format!("--- {} ---", title).cyan().bold().to_string()
}

/// One line per business, numbered from 1
pub fn format_listing(index: usize, listing: &Listing) -> String {
    format!(
        "{}. {} | rating {} | price {} | {} | {}",
        index + 1,
        listing.name,
        listing.rating,
        listing.price,
        listing.address,
        listing.phone
    )
}

pub fn format_review(review: &Review) -> String {
    format!(
        "User: {} Rating: {} Review: {}",
        review.user.name, review.rating, review.text
    )
}

pub fn format_weather(snippet: &WeatherSnippet) -> Vec<String> {
    vec![
        format!("Today : {}", snippet.day_time),
        snippet.condition.clone(),
        format!("{}°C", snippet.temperature_c),
    ]
}
