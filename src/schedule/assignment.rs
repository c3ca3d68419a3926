//! Round-robin assignment of ranked players to sessions

use crate::data_fetcher::models::PlayerRecord;
use crate::error::AppError;
use crate::schedule::sessions::Session;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// One line of the final schedule: a player on duty for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRow {
    pub number: Option<i32>,
    pub name: String,
    pub position: String,
    pub age: Option<i32>,
    pub session_timestamp: NaiveDateTime,
}

impl AssignmentRow {
    pub fn new(player: &PlayerRecord, session: &Session) -> Self {
        Self {
            number: player.number,
            name: player.name.clone(),
            position: player.position.clone(),
            age: player.age,
            session_timestamp: session.timestamp,
        }
    }
}

/// Assigns session `i` to `roster[i % roster.len()]`.
///
/// Output has one row per session, in session order. Every player gets either
/// `floor(M/N)` or `ceil(M/N)` sessions, earlier-ranked players taking the extras.
///
/// # Errors
/// * `AppError::EmptyRoster` - the roster has no players
pub fn assign_round_robin(
    roster: &[PlayerRecord],
    sessions: &[Session],
) -> Result<Vec<AssignmentRow>, AppError> {
    if roster.is_empty() {
        return Err(AppError::EmptyRoster);
    }

    Ok(sessions
        .iter()
        .zip(roster.iter().cycle())
        .map(|(session, player)| AssignmentRow::new(player, session))
        .collect())
}

/// Number of sessions per player name, for run summaries
pub fn assignment_counts(rows: &[AssignmentRow]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.name.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn roster(names: &[&str]) -> Vec<PlayerRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| PlayerRecord::new(Some(i as i32), *name, "", ""))
            .collect()
    }

    fn sessions(count: usize) -> Vec<Session> {
        let start = NaiveDate::from_ymd_opt(2025, 8, 25)
            .unwrap()
            .and_hms_opt(20, 15, 0)
            .unwrap();
        (0..count)
            .map(|i| Session {
                timestamp: start + chrono::Duration::days(7 * i as i64),
            })
            .collect()
    }

    #[test]
    fn test_empty_roster_fails() {
        let result = assign_round_robin(&[], &sessions(3));
        assert!(matches!(result, Err(AppError::EmptyRoster)));
    }

    #[test]
    fn test_empty_roster_fails_even_without_sessions() {
        assert!(matches!(
            assign_round_robin(&[], &[]),
            Err(AppError::EmptyRoster)
        ));
    }

    #[test]
    fn test_no_sessions() {
        let rows = assign_round_robin(&roster(&["A"]), &[]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_cycles_through_roster() {
        let players = roster(&["A", "B", "C"]);
        let sessions = sessions(8);
        let rows = assign_round_robin(&players, &sessions).unwrap();

        assert_eq!(rows.len(), sessions.len());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.name, players[i % players.len()].name);
            assert_eq!(row.session_timestamp, sessions[i].timestamp);
        }
    }

    #[test]
    fn test_even_distribution() {
        let players = roster(&["A", "B", "C", "D"]);
        let rows = assign_round_robin(&players, &sessions(10)).unwrap();
        let counts = assignment_counts(&rows);

        assert_eq!(counts["A"], 3);
        assert_eq!(counts["B"], 3);
        assert_eq!(counts["C"], 2);
        assert_eq!(counts["D"], 2);
    }

    #[test]
    fn test_fewer_sessions_than_players() {
        let players = roster(&["A", "B", "C"]);
        let rows = assign_round_robin(&players, &sessions(2)).unwrap();
        let counts = assignment_counts(&rows);
        assert_eq!(counts.len(), 2);
        assert!(!counts.contains_key("C"));
    }

    #[test]
    fn test_row_copies_player_fields() {
        let player = PlayerRecord::new(None, "Östen", "Målvakt", "url").with_age(Some(31));
        let rows = assign_round_robin(std::slice::from_ref(&player), &sessions(1)).unwrap();
        assert_eq!(rows[0].number, None);
        assert_eq!(rows[0].name, "Östen");
        assert_eq!(rows[0].position, "Målvakt");
        assert_eq!(rows[0].age, Some(31));
    }
}
