//! Application-wide constants and configuration defaults
//!
//! Centralizes the defaults used when no config file or override is present.

/// Default timeout for fetching the roster page in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 15;

/// Default timeout for fetching a single player profile in seconds
pub const DEFAULT_PROFILE_TIMEOUT_SECONDS: u64 = 10;

/// Default number of profile pages fetched concurrently
pub const DEFAULT_PROFILE_CONCURRENCY: usize = 4;

/// Upper bound accepted for any configured timeout
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 8;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("cleaning_rota/", env!("CARGO_PKG_VERSION"));

/// Log file name used when no custom path is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "cleaning_rota.log";

/// Defaults for the roster source and the season calendar
pub mod defaults {
    /// Team roster listing page
    pub const ROSTER_URL: &str = "https://www.laget.se/HKLidkoping-Herrar/Troop";

    /// First day of the season (inclusive), as (year, month, day)
    pub const SEASON_START: (i32, u32, u32) = (2025, 8, 25);

    /// Last day of the season (inclusive), as (year, month, day)
    pub const SEASON_END: (i32, u32, u32) = (2026, 4, 30);

    /// Weekly practice slots
    pub const SESSION_RULES: [&str; 2] = ["Mon 20:15", "Wed 19:00"];

    /// Output CSV file
    pub const OUTPUT_PATH: &str = "HK_Lidkoping_BallWashingSchedule.csv";

    /// Label of the profile table row holding the player's age
    pub const AGE_LABEL: &str = "Ålder";
}

/// Markup of the source website
pub mod markup {
    /// Profile table listing label/value rows
    pub const PROFILE_TABLE_SELECTOR: &str = "table.player__info";
}

/// CSV output format
pub mod csv_format {
    /// Column headers, in output order
    pub const HEADERS: [&str; 5] = ["Number", "Name", "Position", "Age", "CleaningDate"];

    /// chrono format of the session timestamp column
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// UTF-8 byte order mark, written first so spreadsheet tools detect the encoding
    pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for roster URL override
    pub const ROSTER_URL: &str = "CLEANING_ROTA_ROSTER_URL";

    /// Environment variable for output path override
    pub const OUTPUT_PATH: &str = "CLEANING_ROTA_OUTPUT";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "CLEANING_ROTA_LOG_FILE";

    /// Environment variable for roster page timeout in seconds
    pub const HTTP_TIMEOUT: &str = "CLEANING_ROTA_HTTP_TIMEOUT";
}
