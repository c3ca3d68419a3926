use crate::constants::{defaults, env_vars};
use crate::error::AppError;
use crate::schedule::SessionRule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration for one scheduling run.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Roster listing page. Player links on this page are followed for ages.
    pub roster_url: String,
    /// First day of the season, inclusive.
    pub season_start: NaiveDate,
    /// Last day of the season, inclusive.
    pub season_end: NaiveDate,
    /// Weekly session slots, written as `"Mon 20:15"`.
    pub session_rules: Vec<SessionRule>,
    /// Where the schedule CSV is written. Overwritten on every run.
    pub output_path: String,
    /// Label of the profile table row holding the player's age.
    pub age_label: String,
    /// HTTP timeout in seconds for the roster page.
    pub http_timeout_seconds: u64,
    /// HTTP timeout in seconds for each profile page.
    pub profile_timeout_seconds: u64,
    /// Maximum number of profile pages fetched at once.
    pub profile_concurrency: usize,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("default season dates are valid")
}

fn default_session_rules() -> Vec<SessionRule> {
    defaults::SESSION_RULES
        .iter()
        .map(|rule| rule.parse().expect("default session rules are valid"))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            roster_url: defaults::ROSTER_URL.to_string(),
            season_start: default_date(defaults::SEASON_START),
            season_end: default_date(defaults::SEASON_END),
            session_rules: default_session_rules(),
            output_path: defaults::OUTPUT_PATH.to_string(),
            age_label: defaults::AGE_LABEL.to_string(),
            http_timeout_seconds: crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            profile_timeout_seconds: crate::constants::DEFAULT_PROFILE_TIMEOUT_SECONDS,
            profile_concurrency: crate::constants::DEFAULT_PROFILE_CONCURRENCY,
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default config file location.
    ///
    /// A missing default config file is not an error: built-in defaults are used.
    /// A missing file at an explicitly given path is an error.
    /// Environment variables override file values.
    ///
    /// # Environment Variables
    /// - `CLEANING_ROTA_ROSTER_URL` - Override roster URL
    /// - `CLEANING_ROTA_OUTPUT` - Override output path
    /// - `CLEANING_ROTA_LOG_FILE` - Override log file path
    /// - `CLEANING_ROTA_HTTP_TIMEOUT` - Override roster page timeout in seconds
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - Error occurred while reading or parsing the file
    ///
    /// Validation is left to the caller so command line overrides can be applied first.
    pub async fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut config = match path {
            Some(path) => Config::load_from_path(path).await?,
            None => {
                let default_path = get_config_path();
                if Path::new(&default_path).exists() {
                    Config::load_from_path(&default_path).await?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies overrides looked up by environment variable name.
    /// Unparseable numeric values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(roster_url) = lookup(env_vars::ROSTER_URL) {
            self.roster_url = roster_url;
        }

        if let Some(output_path) = lookup(env_vars::OUTPUT_PATH) {
            self.output_path = output_path;
        }

        if let Some(log_file_path) = lookup(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = lookup(env_vars::HTTP_TIMEOUT).and_then(|s| s.parse::<u64>().ok()) {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AppError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Timeout for the roster page request
    pub fn roster_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Timeout for a single profile page request
    pub fn profile_timeout(&self) -> Duration {
        Duration::from_secs(self.profile_timeout_seconds)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Prints the effective configuration to stdout.
    ///
    /// # Arguments
    /// * `source` - Where the configuration was loaded from, shown as the first entry
    pub fn display(&self, source: &str) {
        let log_dir = get_log_dir_path();
        let rules: Vec<String> = self.session_rules.iter().map(ToString::to_string).collect();

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{source}");
        println!("────────────────────────────────────");
        println!("Roster URL:");
        println!("{}", self.roster_url);
        println!("────────────────────────────────────");
        println!("Season:");
        println!("{} – {}", self.season_start, self.season_end);
        println!("────────────────────────────────────");
        println!("Sessions:");
        println!("{}", rules.join(", "));
        println!("────────────────────────────────────");
        println!("Output File:");
        println!("{}", self.output_path);
        println!("────────────────────────────────────");
        println!("Age Label:");
        println!("{}", self.age_label);
        println!("────────────────────────────────────");
        println!("HTTP Timeouts:");
        println!(
            "roster {} s, profile {} s ({} at a time)",
            self.http_timeout_seconds, self.profile_timeout_seconds, self.profile_concurrency
        );
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", crate::constants::DEFAULT_LOG_FILE_NAME);
            println!("(Default location)");
        }
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.roster_url, "https://www.laget.se/HKLidkoping-Herrar/Troop");
        assert_eq!(config.season_start.to_string(), "2025-08-25");
        assert_eq!(config.season_end.to_string(), "2026-04-30");
        assert_eq!(config.session_rules.len(), 2);
        assert_eq!(config.session_rules[0].weekday, Weekday::Mon);
        assert_eq!(config.session_rules[1].weekday, Weekday::Wed);
        assert_eq!(config.age_label, "Ålder");
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
roster_url = "https://www.laget.se/IFK-Test/Troop"
season_start = "2024-09-02"
season_end = "2025-03-31"
session_rules = ["Tue 18:30", "Thu 18:30"]
log_file_path = "/custom/log/path"
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.roster_url, "https://www.laget.se/IFK-Test/Troop");
        assert_eq!(config.season_start.to_string(), "2024-09-02");
        assert_eq!(config.session_rules[1].to_string(), "Thu 18:30");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        // unspecified fields keep their defaults
        assert_eq!(config.output_path, defaults::OUTPUT_PATH);
        assert_eq!(
            config.profile_concurrency,
            crate::constants::DEFAULT_PROFILE_CONCURRENCY
        );
    }

    #[tokio::test]
    async fn test_config_load_explicit_missing_path_fails() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let result = Config::load(Some(&missing.to_string_lossy())).await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_config_load_invalid_rule() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, r#"session_rules = ["Caturday 10:00"]"#)
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result, Err(AppError::TomlDeserialize(_))));
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original_config = Config {
            output_path: "/tmp/schema.csv".to_string(),
            session_rules: vec!["Sat 09:00".parse().unwrap()],
            log_file_path: Some("/custom/log/path".to_string()),
            ..Config::default()
        };
        original_config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let content = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(content.contains("\"Sat 09:00\""), "{content}");

        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_config_without_log_file_path_serialization() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!toml_string.contains("log_file_path"));
        assert!(toml_string.contains("age_label = \"Ålder\""));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (env_vars::ROSTER_URL, "https://example.com/Team/Troop"),
            (env_vars::OUTPUT_PATH, "out.csv"),
            (env_vars::HTTP_TIMEOUT, "42"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.roster_url, "https://example.com/Team/Troop");
        assert_eq!(config.output_path, "out.csv");
        assert_eq!(config.http_timeout_seconds, 42);
        assert_eq!(config.log_file_path, None);
    }

    #[test]
    fn test_overrides_ignore_bad_timeout() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == env_vars::HTTP_TIMEOUT).then(|| "soon".to_string()));
        assert_eq!(
            config.http_timeout_seconds,
            crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
        );
    }

    #[test]
    fn test_timeouts_as_durations() {
        let config = Config {
            http_timeout_seconds: 3,
            profile_timeout_seconds: 2,
            ..Config::default()
        };
        assert_eq!(config.roster_timeout(), Duration::from_secs(3));
        assert_eq!(config.profile_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_get_config_path() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("cleaning_rota"));
        assert!(config_path.ends_with("config.toml"));
    }

    #[test]
    fn test_get_log_dir_path() {
        let log_dir_path = Config::get_log_dir_path();
        assert!(log_dir_path.contains("cleaning_rota"));
        assert!(log_dir_path.ends_with("logs"));
    }
}
