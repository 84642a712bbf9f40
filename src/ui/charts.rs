//! Text charts for a search result
//!
//! Widgets are rendered into an off-screen ratatui `Buffer` and returned as
//! plain lines, so they can be printed into the normal console scrollback.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, Widget},
};

use crate::data::{Listing, RatingClass};

/// Default chart size in terminal cells
pub const CHART_WIDTH: u16 = 80;
pub const CHART_HEIGHT: u16 = 20;

/// Ratings are scaled by this factor so half stars become whole bar units
const RATING_SCALE: f64 = 10.0;

const PRICE_LABELS: [&str; 5] = ["none", "$", "$$", "$$$", "$$$$"];

/// Renders a bar chart of the rating of every listing
///
/// Bars are labelled with their position in the result set and a legend
/// naming each business is appended below the chart, so narrow bars never
/// hide a name. Returns no lines for an empty result set.
pub fn rating_bar_chart(listings: &[Listing], location: &str, width: u16, height: u16) -> Vec<String> {
    if listings.is_empty() {
        return Vec::new();
    }

    let bars: Vec<Bar> = listings
        .iter()
        .enumerate()
        .map(|(index, listing)| {
            Bar::default()
                .value((listing.rating * RATING_SCALE).round() as u64)
                .text_value(format!("{:.1}", listing.rating))
                .label(Line::from((index + 1).to_string()))
        })
        .collect();

    let (bar_width, bar_gap) = bar_layout(listings.len(), width);
    let chart = BarChart::default()
        .block(Block::bordered().title(format!("Restaurant rating in {}", location)))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .bar_style(Style::default().fg(Color::Cyan))
        .max((5.0 * RATING_SCALE) as u64);

    let mut lines = render_lines(chart, width, height);
    lines.extend(
        listings
            .iter()
            .enumerate()
            .map(|(index, l)| format!("  {}. {} ({:.1})", index + 1, l.name, l.rating)),
    );
    lines
}

/// Renders a scatter of price level (x) against rating class (y)
///
/// Returns no lines for an empty result set. A legend naming each point is
/// appended below the chart.
pub fn price_rating_scatter(listings: &[Listing], width: u16, height: u16) -> Vec<String> {
    if listings.is_empty() {
        return Vec::new();
    }

    let points: Vec<(f64, f64)> = listings
        .iter()
        .map(|l| (l.price.axis_value(), l.rating_class().axis_value()))
        .collect();

    let dataset = Dataset::default()
        .name("restaurants")
        .marker(Marker::Block)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Green))
        .data(&points);

    let x_labels: Vec<Span> = PRICE_LABELS.iter().map(|l| Span::raw(*l)).collect();
    let y_labels: Vec<Span> = RatingClass::ALL.iter().map(|c| Span::raw(c.label())).collect();

    let chart = Chart::new(vec![dataset])
        .block(Block::bordered().title("Rating(y) and Price(x) of restaurant in your search area"))
        .x_axis(Axis::default().title("price").bounds([0.0, 4.0]).labels(x_labels))
        .y_axis(Axis::default().title("rating").bounds([0.0, 4.0]).labels(y_labels));

    let mut lines = render_lines(chart, width, height);
    lines.extend(listings.iter().map(|l| {
        format!("  {} (price {}, {})", l.name, l.price, l.rating_class().label())
    }));
    lines
}

/// Bar width and gap so that `count` bars fit inside the bordered area
///
/// Bars shrink to one cell before the gap is dropped. Past one cell per bar
/// with no gap the remaining bars cannot be drawn.
fn bar_layout(count: usize, width: u16) -> (u16, u16) {
    const GAP: usize = 1;
    const MAX_BAR_WIDTH: usize = 12;

    let inner = width.saturating_sub(2) as usize;
    let count = count.max(1);
    let per_bar = (inner + GAP) / count;

    if per_bar > GAP {
        ((per_bar - GAP).min(MAX_BAR_WIDTH) as u16, GAP as u16)
    } else {
        ((inner / count).max(1) as u16, 0)
    }
}

fn render_lines<W: Widget>(widget: W, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_lines(&buf)
}

/// Converts a buffer into its text rows with trailing spaces removed
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = buf.area.width.max(1) as usize;
    buf.content
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
