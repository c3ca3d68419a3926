//! Ranking, session calendar and duty assignment

pub mod assignment;
pub mod ranking;
pub mod sessions;

pub use assignment::{AssignmentRow, assign_round_robin, assignment_counts};
pub use ranking::rank_by_age;
pub use sessions::{Session, SessionRule, generate_sessions};
