use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] reqwest::Error),

    // Specific HTTP status code errors
    #[error("Page not found (404): {url}")]
    PageNotFound { url: String },

    #[error("Server error ({status}): {message} (URL: {url})")]
    ServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Client error ({status}): {message} (URL: {url})")]
    ClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Rate limit exceeded (429): {message} (URL: {url})")]
    RateLimit { message: String, url: String },

    #[error("Service unavailable ({status}): {message} (URL: {url})")]
    ServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    #[error("Page returned an empty body: {url}")]
    EmptyPage { url: String },

    // Roster and schedule errors
    #[error("No player links found on roster page: {url}")]
    NoPlayersFound { url: String },

    #[error("Cannot assign sessions: the roster is empty")]
    EmptyRoster,

    #[error("Invalid session rule '{rule}': {reason}")]
    InvalidSessionRule { rule: String, reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed schedule file (row {row}): {message}")]
    ScheduleFormat { row: usize, message: String },

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a page not found error
    pub fn page_not_found(url: impl Into<String>) -> Self {
        Self::PageNotFound { url: url.into() }
    }

    /// Create a server error (5xx status codes)
    pub fn server_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a client error (4xx status codes except 404 and 429)
    pub fn client_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a rate limit error
    pub fn rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a service unavailable error
    pub fn service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an empty page error
    pub fn empty_page(url: impl Into<String>) -> Self {
        Self::EmptyPage { url: url.into() }
    }

    /// Create a no players found error
    pub fn no_players_found(url: impl Into<String>) -> Self {
        Self::NoPlayersFound { url: url.into() }
    }

    /// Create an invalid session rule error
    pub fn invalid_session_rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSessionRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed schedule file error
    pub fn schedule_format(row: usize, message: impl Into<String>) -> Self {
        Self::ScheduleFormat {
            row,
            message: message.into(),
        }
    }

    /// Check if the error came from the network or the remote server
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(_)
                | AppError::PageNotFound { .. }
                | AppError::ServerError { .. }
                | AppError::ClientError { .. }
                | AppError::RateLimit { .. }
                | AppError::ServiceUnavailable { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::EmptyPage { .. }
        )
    }

    /// Errors that end a batch run: the roster page could not be fetched or
    /// parsed, or there is nobody to assign sessions to
    pub fn is_fatal_for_batch(&self) -> bool {
        self.is_network_error()
            || matches!(
                self,
                AppError::NoPlayersFound { .. } | AppError::EmptyRoster
            )
    }

    /// Text shown on stderr when a run fails. Fatal errors also name the
    /// precondition that did not hold.
    pub fn user_message(&self) -> String {
        if self.is_fatal_for_batch() {
            format!(
                "Error: {self}\nFailed precondition: {}",
                self.failed_precondition()
            )
        } else {
            format!("Error: {self}")
        }
    }

    /// Short description of the precondition that failed, shown to the user on exit
    pub fn failed_precondition(&self) -> &'static str {
        match self {
            AppError::EmptyRoster | AppError::NoPlayersFound { .. } => "roster has players",
            e if e.is_network_error() => "roster page reachable",
            AppError::Config(_)
            | AppError::InvalidSessionRule { .. }
            | AppError::InvalidUrl { .. }
            | AppError::TomlDeserialize(_)
            | AppError::TomlSerialize(_) => "configuration valid",
            AppError::Io(_) | AppError::Csv(_) | AppError::ScheduleFormat { .. } => {
                "files accessible"
            }
            _ => "logging initialized",
        }
    }
}
