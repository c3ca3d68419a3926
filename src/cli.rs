use crate::config::Config;
use crate::schedule::SessionRule;
use chrono::NaiveDate;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Cleaning rota generator
///
/// Reads the team roster page, looks up each player's age from their profile,
/// and assigns every training session of the season to a player in turn,
/// youngest first. The schedule is written as a CSV file.
///
/// Settings come from the config file, then environment variables, then these flags.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Read settings from this config file instead of the default location.
    #[arg(long = "config", value_name = "PATH", help_heading = "Configuration")]
    pub config_path: Option<String>,

    /// List the effective configuration and exit
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Save the effective configuration to the config file and exit.
    /// Combine with other flags to change stored settings.
    #[arg(long = "write-config", help_heading = "Configuration")]
    pub write_config: bool,

    /// Roster page listing the players
    #[arg(long = "roster-url", value_name = "URL", help_heading = "Schedule")]
    pub roster_url: Option<String>,

    /// First day of the season (YYYY-MM-DD)
    #[arg(long = "start", value_name = "DATE", help_heading = "Schedule")]
    pub season_start: Option<NaiveDate>,

    /// Last day of the season (YYYY-MM-DD), inclusive
    #[arg(long = "end", value_name = "DATE", help_heading = "Schedule")]
    pub season_end: Option<NaiveDate>,

    /// Weekly session such as "Mon 20:15". Repeat for several sessions;
    /// replaces the configured sessions.
    #[arg(long = "session", value_name = "RULE", help_heading = "Schedule")]
    pub sessions: Vec<SessionRule>,

    /// Where to write the schedule CSV
    #[arg(short = 'o', long = "output", value_name = "PATH", help_heading = "Output")]
    pub output: Option<String>,

    /// Print the schedule to stdout instead of writing the file
    #[arg(long = "dry-run", help_heading = "Output")]
    pub dry_run: bool,

    /// Number of profile pages fetched at the same time
    #[arg(long = "concurrency", value_name = "N", help_heading = "Network")]
    pub concurrency: Option<usize>,

    /// Also print logs to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    /// Overrides config values with the flags that were given
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(roster_url) = &self.roster_url {
            config.roster_url = roster_url.clone();
        }
        if let Some(start) = self.season_start {
            config.season_start = start;
        }
        if let Some(end) = self.season_end {
            config.season_end = end;
        }
        if !self.sessions.is_empty() {
            config.session_rules = self.sessions.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.profile_concurrency = concurrency;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file_path = Some(log_file.clone());
        }
    }
}
