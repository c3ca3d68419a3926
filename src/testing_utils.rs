use crate::data_fetcher::PageSource;
use crate::data_fetcher::models::PlayerRecord;
use crate::error::AppError;
use std::collections::HashMap;
use std::time::Duration;

/// Page source serving fixed HTML keyed by URL.
///
/// Unknown URLs fail with a 404 error, like a missing page would.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: HashMap<String, String>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page served at `url`
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }
}

impl PageSource for StaticPageSource {
    async fn fetch_page(&self, url: &str, _timeout: Duration) -> Result<String, AppError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::page_not_found(url))
    }
}

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a player with a unique profile URL and no age
    pub fn player(number: Option<i32>, name: &str) -> PlayerRecord {
        PlayerRecord::new(
            number,
            name,
            "",
            format!(
                "https://www.laget.se/Team/Troop/{}/{}/",
                number.unwrap_or_default(),
                name
            ),
        )
    }

    /// Creates a player with a known age
    pub fn player_with_age(number: Option<i32>, name: &str, age: Option<i32>) -> PlayerRecord {
        Self::player(number, name).with_age(age)
    }

    /// Creates a roster link whose text has one line per entry of `lines`
    pub fn roster_link(href: &str, lines: &[&str]) -> String {
        let spans: Vec<String> = lines
            .iter()
            .map(|line| format!("  <span>{line}</span>"))
            .collect();
        format!("<a href=\"{href}\">\n{}\n</a>", spans.join("\n"))
    }

    /// Wraps links in a roster listing page
    pub fn roster_page(links: &[String]) -> String {
        format!(
            "<html><head><title>Truppen</title></head><body><div class=\"troop\">\n{}\n</div></body></html>",
            links.join("\n")
        )
    }

    /// Creates a profile page with a `player__info` table of label/value rows
    pub fn profile_page(rows: &[(&str, &str)]) -> String {
        let rows: Vec<String> = rows
            .iter()
            .map(|(label, value)| format!("<tr><th>{label}</th><td>{value}</td></tr>"))
            .collect();
        format!(
            "<html><body><table class=\"player__info\">{}</table></body></html>",
            rows.concat()
        )
    }
}
