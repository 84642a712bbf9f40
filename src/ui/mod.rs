//! Console rendering for search results
//!
//! Charts use ratatui widgets drawn into off-screen buffers; prompts and
//! result lines are plain text styled with crossterm.

pub mod charts;
pub mod console;

pub use charts::{price_rating_scatter, rating_bar_chart, CHART_HEIGHT, CHART_WIDTH};
pub use console::{parse_answer, Answer};
