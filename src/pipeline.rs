//! The batch run: roster page to schedule file

use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::data_fetcher::models::PlayerRecord;
use crate::data_fetcher::profile::enrich_ages;
use crate::data_fetcher::roster::extract_players;
use crate::data_fetcher::urls::parse_roster_url;
use crate::data_fetcher::PageSource;
use crate::error::AppError;
use crate::export::write_schedule_csv;
use crate::schedule::{
    AssignmentRow, assign_round_robin, assignment_counts, generate_sessions, rank_by_age,
};

/// A computed schedule and the ranked roster it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub roster: Vec<PlayerRecord>,
    pub rows: Vec<AssignmentRow>,
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub players: usize,
    pub sessions: usize,
}

/// Fetches the roster page and extracts its players.
///
/// # Errors
/// * Any fetch error for the roster page
/// * `AppError::NoPlayersFound` - the page has no player links
#[instrument(skip(source, config), fields(url = %config.roster_url))]
pub async fn fetch_roster<S: PageSource>(
    source: &S,
    config: &Config,
) -> Result<Vec<PlayerRecord>, AppError> {
    let roster_url = parse_roster_url(&config.roster_url)?;
    let html = source
        .fetch_page(&config.roster_url, config.roster_timeout())
        .await
        .inspect_err(|e| error!("Failed to fetch roster page: {e}"))?;

    let players = extract_players(&html, &roster_url);
    if players.is_empty() {
        return Err(AppError::no_players_found(&config.roster_url));
    }
    Ok(players)
}

/// Builds the schedule without touching the filesystem.
///
/// Fetches and enriches the roster, ranks it youngest first, generates the
/// session calendar and assigns sessions round-robin.
pub async fn build_schedule<S: PageSource>(
    config: &Config,
    source: &S,
) -> Result<Schedule, AppError> {
    let players = fetch_roster(source, config).await?;

    let players = enrich_ages(
        players,
        source,
        &config.age_label,
        config.profile_timeout(),
        config.profile_concurrency,
    )
    .await;

    let missing_ages = players.iter().filter(|p| p.age.is_none()).count();
    if missing_ages * 2 > players.len() {
        warn!(
            "No age found for {missing_ages} of {} players; check the age label '{}'",
            players.len(),
            config.age_label
        );
    }

    let roster = rank_by_age(players);

    let sessions = generate_sessions(
        config.season_start,
        config.season_end,
        &config.session_rules,
    );
    if sessions.is_empty() {
        warn!(
            "No sessions between {} and {}",
            config.season_start, config.season_end
        );
    } else {
        info!(
            "Generated {} sessions between {} and {}",
            sessions.len(),
            config.season_start,
            config.season_end
        );
    }

    let rows = assign_round_robin(&roster, &sessions)?;
    for (name, count) in assignment_counts(&rows) {
        debug!("{name}: {count} sessions");
    }

    Ok(Schedule { roster, rows })
}

/// Builds the schedule and writes it to the configured output path
pub async fn run<S: PageSource>(config: &Config, source: &S) -> Result<RunSummary, AppError> {
    let schedule = build_schedule(config, source).await?;
    let output_path = PathBuf::from(&config.output_path);

    write_schedule_csv(&output_path, &schedule.rows)?;

    Ok(RunSummary {
        output_path,
        players: schedule.roster.len(),
        sessions: schedule.rows.len(),
    })
}
