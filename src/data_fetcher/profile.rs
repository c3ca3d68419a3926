//! Best-effort age lookup from player profile pages

use futures::stream::{self, StreamExt};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::constants::markup::PROFILE_TABLE_SELECTOR;
use crate::data_fetcher::fetch::PageSource;
use crate::data_fetcher::models::PlayerRecord;

static PROFILE_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(PROFILE_TABLE_SELECTOR).expect("static selector must parse")
});
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector must parse"));
static LABEL_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("static selector must parse"));
static VALUE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector must parse"));

/// Reads the age from a profile page.
///
/// Looks for the first row of the profile info table whose header cell reads
/// exactly `label` and parses the paired value cell as an integer. Returns
/// `None` when the table, the row or a numeric value is missing.
///
/// # Example
/// ```
/// use cleaning_rota::data_fetcher::profile::parse_age;
///
/// let html = r#"<table class="player__info"><tr><th>Ålder</th><td> 23 </td></tr></table>"#;
/// assert_eq!(parse_age(html, "Ålder"), Some(23));
/// assert_eq!(parse_age(html, "Age"), None);
/// ```
pub fn parse_age(html: &str, label: &str) -> Option<i32> {
    let document = Html::parse_document(html);
    let table = document.select(&PROFILE_TABLE).next()?;

    let value = table.select(&ROW).find_map(|row| {
        let header = row.select(&LABEL_CELL).next()?;
        let cell = row.select(&VALUE_CELL).next()?;
        (cell_text(header) == label).then(|| cell_text(cell))
    })?;

    value.parse().ok()
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Fetches one profile page and reads the age from it.
///
/// Never fails: any fetch error, non-success status, timeout or missing
/// structure yields `None`.
#[instrument(skip(source, label))]
pub async fn fetch_age<S: PageSource>(
    source: &S,
    profile_url: &str,
    label: &str,
    timeout: Duration,
) -> Option<i32> {
    match source.fetch_page(profile_url, timeout).await {
        Ok(html) => {
            let age = parse_age(&html, label);
            if age.is_none() {
                debug!("No '{label}' value on profile page {profile_url}");
            }
            age
        }
        Err(e) => {
            debug!("Failed to fetch profile page {profile_url}: {e}");
            None
        }
    }
}

/// Sets the age of every player from their profile page.
///
/// At most `concurrency` profiles are fetched at once. Output order equals
/// input order regardless of which fetch finishes first.
pub async fn enrich_ages<S: PageSource>(
    players: Vec<PlayerRecord>,
    source: &S,
    label: &str,
    timeout: Duration,
    concurrency: usize,
) -> Vec<PlayerRecord> {
    let total = players.len();

    let enriched: Vec<PlayerRecord> = stream::iter(players)
        .map(|player| async move {
            let age = fetch_age(source, &player.profile_url, label, timeout).await;
            player.with_age(age)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let with_age = enriched.iter().filter(|p| p.age.is_some()).count();
    info!("Found ages for {with_age}/{total} players");

    enriched
}
