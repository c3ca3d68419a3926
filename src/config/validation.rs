use crate::config::Config;
use crate::constants::MAX_TIMEOUT_SECONDS;
use crate::data_fetcher::urls::parse_roster_url;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Returns
/// * `Ok(())` - Configuration is valid
/// * `Err(AppError)` - Configuration validation failed
///
/// # Validation Rules
/// - Roster URL must be an absolute http(s) URL
/// - At least one session rule
/// - Output path cannot be empty; its parent directory must exist or be creatable
/// - Age label cannot be empty
/// - Timeouts must be between 1 and 300 seconds, concurrency at least 1
/// - If log file path is provided, it cannot be empty
///
/// A season end before its start is allowed and produces an empty calendar.
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    parse_roster_url(&config.roster_url)
        .map_err(|e| AppError::config_error(format!("Roster URL is not usable: {e}")))?;

    if config.session_rules.is_empty() {
        return Err(AppError::config_error(
            "At least one session rule is required",
        ));
    }

    if config.output_path.trim().is_empty() {
        return Err(AppError::config_error("Output path cannot be empty"));
    }
    ensure_parent_dir(&config.output_path, "output")?;

    if config.age_label.trim().is_empty() {
        return Err(AppError::config_error("Age label cannot be empty"));
    }

    for (name, value) in [
        ("http_timeout_seconds", config.http_timeout_seconds),
        ("profile_timeout_seconds", config.profile_timeout_seconds),
    ] {
        if !(1..=MAX_TIMEOUT_SECONDS).contains(&value) {
            return Err(AppError::config_error(format!(
                "{name} must be between 1 and {MAX_TIMEOUT_SECONDS}, got {value}"
            )));
        }
    }

    if config.profile_concurrency == 0 {
        return Err(AppError::config_error(
            "profile_concurrency must be at least 1",
        ));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }
        ensure_parent_dir(log_path, "log")?;
    }

    Ok(())
}

/// Creates the parent directory of `path` if it is missing
fn ensure_parent_dir(path: &str, what: &str) -> Result<(), AppError> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create {what} directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}
