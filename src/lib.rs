//! Cleaning rota generator library
//!
//! Builds a season-long duty schedule for a sports team: the roster is scraped
//! from the team's web page, each player's age is read from their profile,
//! players are ranked youngest first and training sessions are handed out
//! round-robin. The result is exported as CSV.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cleaning_rota::config::Config;
//! use cleaning_rota::data_fetcher::HttpPageSource;
//! use cleaning_rota::error::AppError;
//! use cleaning_rota::pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load(None).await?;
//!     config.validate()?;
//!
//!     let source = HttpPageSource::from_config(&config)?;
//!     let summary = pipeline::run(&config, &source).await?;
//!
//!     println!("{} sessions written to {}", summary.sessions, summary.output_path.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod schedule;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::{HttpPageSource, PageSource, PlayerRecord};
pub use error::AppError;
pub use pipeline::{RunSummary, Schedule, build_schedule, run};
pub use schedule::{AssignmentRow, Session, SessionRule};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
