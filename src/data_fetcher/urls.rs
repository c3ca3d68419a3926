//! URL helpers for roster and profile links

use reqwest::Url;

use crate::error::AppError;

/// Parses the roster page URL, accepting only absolute http(s) URLs.
///
/// # Example
/// ```
/// use cleaning_rota::data_fetcher::urls::parse_roster_url;
///
/// let url = parse_roster_url("https://www.laget.se/HKLidkoping-Herrar/Troop").unwrap();
/// assert_eq!(url.host_str(), Some("www.laget.se"));
/// assert!(parse_roster_url("laget.se/Troop").is_err());
/// ```
pub fn parse_roster_url(roster_url: &str) -> Result<Url, AppError> {
    let url = Url::parse(roster_url).map_err(|e| AppError::invalid_url(roster_url, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::invalid_url(
            roster_url,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Path prefix that player links on the roster page share, without a trailing slash.
///
/// # Example
/// ```
/// use cleaning_rota::data_fetcher::urls::{listing_path, parse_roster_url};
///
/// let url = parse_roster_url("https://www.laget.se/HKLidkoping-Herrar/Troop/").unwrap();
/// assert_eq!(listing_path(&url), "/HKLidkoping-Herrar/Troop");
/// ```
pub fn listing_path(roster_url: &Url) -> &str {
    roster_url.path().trim_end_matches('/')
}

/// Whether `href` points at a roster detail page.
///
/// The link path must contain a numeric segment enclosed in slashes
/// (`/Troop/123/Name`), and when `listing_path` is non-empty it must
/// contain `listing_path` followed by a slash.
pub fn is_roster_detail_href(href: &str, listing_path: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or_default();

    if !listing_path.is_empty() && !path.contains(&format!("{listing_path}/")) {
        return false;
    }

    let segments: Vec<&str> = path.split('/').collect();
    segments.len() >= 3
        && segments[1..segments.len() - 1]
            .iter()
            .any(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
}

/// Resolves a link found on the roster page to an absolute profile URL
pub fn resolve_profile_url(roster_url: &Url, href: &str) -> Option<String> {
    roster_url.join(href).ok().map(String::from)
}
