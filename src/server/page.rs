//! HTML rendering of the results page

use crate::data::SearchReport;

/// Escapes text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the page for a report, or a placeholder before the first search
pub fn render_page(report: Option<&SearchReport>) -> String {
    let body = match report {
        Some(report) => render_report(report),
        None => "<p>No search yet. Enter a city and a food term in the console.</p>".to_string(),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Food finder</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        body
    )
}

fn render_report(report: &SearchReport) -> String {
    let mut html = format!(
        "<h1>{} in {}</h1>\n",
        escape_html(&report.term),
        escape_html(&report.location)
    );

    if let Some(weather) = &report.weather {
        html.push_str(&format!(
            "<p class=\"weather\">Weather: {}, {}&deg;C</p>\n",
            escape_html(&weather.condition),
            escape_html(&weather.temperature_c)
        ));
    }

    html.push_str("<table>\n<tr><th>Name</th><th>Rating</th><th>Address</th><th>Phone</th></tr>\n");
    for listing in &report.listings {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&listing.name),
            listing.rating,
            escape_html(&listing.address),
            escape_html(&listing.phone)
        ));
    }
    html.push_str("</table>\n");

    html.push_str(&format!(
        "<p class=\"generated\">Results as of {}</p>\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html
}
