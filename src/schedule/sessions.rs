//! Recurring weekly session calendar

use crate::constants::csv_format::TIMESTAMP_FORMAT;
use crate::error::AppError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weekly slot: every `weekday` at `time`.
///
/// Written as `"Mon 20:15"`; the weekday accepts English short or full names in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionRule {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl SessionRule {
    pub fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    /// Whether this rule fires on the given date
    pub fn matches(&self, date: NaiveDate) -> bool {
        date.weekday() == self.weekday
    }
}

impl FromStr for SessionRule {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(day), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AppError::invalid_session_rule(
                s,
                "expected '<weekday> <HH:MM>'",
            ));
        };

        let weekday = day
            .parse::<Weekday>()
            .map_err(|_| AppError::invalid_session_rule(s, format!("unknown weekday '{day}'")))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|e| AppError::invalid_session_rule(s, format!("invalid time '{time}': {e}")))?;

        Ok(Self { weekday, time })
    }
}

impl TryFrom<String> for SessionRule {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionRule> for String {
    fn from(rule: SessionRule) -> Self {
        rule.to_string()
    }
}

impl fmt::Display for SessionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.time.format("%H:%M"))
    }
}

/// One scheduled occurrence needing an assignee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Session {
    pub timestamp: NaiveDateTime,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timestamp.format(TIMESTAMP_FORMAT))
    }
}

/// Builds the session calendar between `start` and `end`, both inclusive.
///
/// Walks the range one day at a time and emits a session for every rule whose
/// weekday matches, so sessions on the same date follow rule-declaration order.
/// An inverted range yields no sessions.
pub fn generate_sessions(start: NaiveDate, end: NaiveDate, rules: &[SessionRule]) -> Vec<Session> {
    let mut sessions = Vec::new();
    let mut date = start;

    while date <= end {
        sessions.extend(
            rules
                .iter()
                .filter(|rule| rule.matches(date))
                .map(|rule| Session {
                    timestamp: date.and_time(rule.time),
                }),
        );

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    sessions
}
