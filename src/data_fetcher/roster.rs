//! Extracting player records from the roster listing page

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, instrument};

use crate::data_fetcher::models::PlayerRecord;
use crate::data_fetcher::urls::{is_roster_detail_href, listing_path, resolve_profile_url};

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector must parse"));

/// Extracts players from the roster page in document order.
///
/// Every link pointing at a roster detail page becomes one record, parsed from
/// the link's text lines:
/// - `number, name, position`
/// - `number, name` (no position)
/// - anything else: the first line is the name and the number is unset
///
/// A number that does not parse is left unset. Links without any text are
/// skipped. No deduplication is done.
#[instrument(skip(html, roster_url), fields(url = %roster_url))]
pub fn extract_players(html: &str, roster_url: &Url) -> Vec<PlayerRecord> {
    let document = Html::parse_document(html);
    let listing = listing_path(roster_url);

    let players: Vec<PlayerRecord> = document
        .select(&LINK_SELECTOR)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            if !is_roster_detail_href(href, listing) {
                return None;
            }
            let profile_url = resolve_profile_url(roster_url, href)?;
            player_from_lines(&link_text_lines(link), profile_url)
        })
        .collect();

    info!("Extracted {} players from roster page", players.len());
    players
}

/// Non-empty, trimmed lines of an element's text
fn link_text_lines(link: ElementRef<'_>) -> Vec<String> {
    let text: String = link.text().collect();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn player_from_lines(lines: &[String], profile_url: String) -> Option<PlayerRecord> {
    let (number_text, name, position) = match lines {
        [number, name, position] => (Some(number.as_str()), name, position.as_str()),
        [number, name] => (Some(number.as_str()), name, ""),
        [name, ..] => (None, name, ""),
        [] => {
            debug!("Skipping roster link without text: {profile_url}");
            return None;
        }
    };

    let number = number_text.and_then(|text| match text.parse::<i32>() {
        Ok(number) => Some(number),
        Err(_) => {
            debug!("Unparseable player number '{text}' for {name}");
            None
        }
    });

    Some(PlayerRecord::new(number, name.as_str(), position, profile_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::urls::parse_roster_url;

    fn roster_url() -> Url {
        parse_roster_url("https://www.laget.se/HKLidkoping-Herrar/Troop").unwrap()
    }

    fn page(body: &str) -> String {
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn test_three_line_link() {
        let html = page(
            r#"<a href="/HKLidkoping-Herrar/Troop/101/Anna">
                <span>5</span>
                <span>Anna Berg</span>
                <span>Vänsternia</span>
            </a>"#,
        );
        let players = extract_players(&html, &roster_url());
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].number, Some(5));
        assert_eq!(players[0].name, "Anna Berg");
        assert_eq!(players[0].position, "Vänsternia");
        assert_eq!(
            players[0].profile_url,
            "https://www.laget.se/HKLidkoping-Herrar/Troop/101/Anna"
        );
        assert_eq!(players[0].age, None);
    }

    #[test]
    fn test_two_line_link_has_empty_position() {
        let html = page("<a href=\"/HKLidkoping-Herrar/Troop/102/\">\n7\nBo Ek\n</a>");
        let players = extract_players(&html, &roster_url());
        assert_eq!(players[0].number, Some(7));
        assert_eq!(players[0].name, "Bo Ek");
        assert_eq!(players[0].position, "");
    }

    #[test]
    fn test_single_and_many_lines_use_first_line_as_name() {
        let html = page(
            "<a href=\"/HKLidkoping-Herrar/Troop/103/\">Carl</a>\
             <a href=\"/HKLidkoping-Herrar/Troop/104/\">\n1\n2\n3\n4\n</a>",
        );
        let players = extract_players(&html, &roster_url());
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Carl");
        assert_eq!(players[0].number, None);
        assert_eq!(players[1].name, "1");
        assert_eq!(players[1].number, None);
        assert_eq!(players[1].position, "");
    }

    #[test]
    fn test_unparseable_number_is_unset() {
        let html = page("<a href=\"/HKLidkoping-Herrar/Troop/105/\">\n#9\nDan\nMV\n</a>");
        let players = extract_players(&html, &roster_url());
        assert_eq!(players[0].number, None);
        assert_eq!(players[0].name, "Dan");
        assert_eq!(players[0].position, "MV");
    }

    #[test]
    fn test_negative_number_is_kept() {
        let html = page("<a href=\"/HKLidkoping-Herrar/Troop/107/\">\n-3\nA\n</a>");
        let players = extract_players(&html, &roster_url());
        assert_eq!(players[0].number, Some(-3));
        assert_eq!(players[0].name, "A");
    }

    #[test]
    fn test_non_roster_links_ignored() {
        let html = page(
            r#"<a href="/HKLidkoping-Herrar/News/200/">News</a>
               <a href="/HKLidkoping-Herrar/Troop/">Troop</a>
               <a href="/OtherClub/Troop/300/">Other</a>
               <a>No href</a>
               <a href="/HKLidkoping-Herrar/Troop/301/">Eva</a>"#,
        );
        let players = extract_players(&html, &roster_url());
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Eva");
    }

    #[test]
    fn test_empty_link_text_skipped() {
        let html = page(r#"<a href="/HKLidkoping-Herrar/Troop/106/"><img src="x.png"></a>"#);
        assert!(extract_players(&html, &roster_url()).is_empty());
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let html = page(
            "<a href=\"/HKLidkoping-Herrar/Troop/1/\">\n1\nA\n</a>\
             <a href=\"/HKLidkoping-Herrar/Troop/2/\">\n2\nB\n</a>\
             <a href=\"/HKLidkoping-Herrar/Troop/1/\">\n1\nA\n</a>",
        );
        let names: Vec<String> = extract_players(&html, &roster_url())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_players("", &roster_url()).is_empty());
    }
}
