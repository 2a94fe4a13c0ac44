use crate::error::*;
use crate::types::{SearchKind, SearchQuery};
use tracing::error;

pub trait ErrorExt {
    /// Stable identifier for logs, e.g. `REDDIT_SUBREDDIT_NOT_FOUND`.
    fn error_code(&self) -> &'static str;
    fn user_friendly_message(&self) -> String;
}

impl ErrorExt for CoreError {
    fn error_code(&self) -> &'static str {
        match self {
            CoreError::RedditApi(e) => e.error_code(),
            CoreError::Config(e) => e.error_code(),
            CoreError::Io(_) => "IO",
            CoreError::Network(_) => "NETWORK",
            CoreError::InvalidInput { .. } => "INVALID_INPUT",
            CoreError::RequestFailed { .. } => "REQUEST_FAILED",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(e) => format!("A file could not be read ({e})."),
            CoreError::Network(_) => {
                "Reddit could not be reached. Check your connection or switch to mock data."
                    .to_string()
            }
            CoreError::InvalidInput { message } => format!("{message}."),
            CoreError::RequestFailed { status_code, .. } => match status_code {
                Some(code) => format!("Reddit answered with HTTP {code}."),
                None => "Reddit did not answer the request.".to_string(),
            },
        }
    }
}

impl ErrorExt for RedditApiError {
    fn error_code(&self) -> &'static str {
        match self {
            RedditApiError::RateLimitExceeded => "REDDIT_RATE_LIMIT",
            RedditApiError::Forbidden { .. } => "REDDIT_FORBIDDEN",
            RedditApiError::SubredditNotFound { .. } => "REDDIT_SUBREDDIT_NOT_FOUND",
            RedditApiError::RequestTimeout => "REDDIT_TIMEOUT",
            RedditApiError::InvalidResponse { .. } => "REDDIT_INVALID_RESPONSE",
            RedditApiError::ServerError { .. } => "REDDIT_SERVER_ERROR",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::RateLimitExceeded => {
                "Reddit is rate limiting requests. Wait a minute before searching again."
                    .to_string()
            }
            RedditApiError::Forbidden { resource } => {
                format!("Reddit refused access to '{resource}'.")
            }
            RedditApiError::SubredditNotFound { subreddit } => {
                format!("Subreddit '{subreddit}' not found or is private.")
            }
            RedditApiError::RequestTimeout => "Reddit took too long to respond.".to_string(),
            RedditApiError::InvalidResponse { .. } => {
                "Reddit sent a response that is not a post listing.".to_string()
            }
            RedditApiError::ServerError { status_code } => {
                format!("Reddit is having trouble (HTTP {status_code}).")
            }
        }
    }
}

impl ErrorExt for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::InvalidFormat { .. } => "CONFIG_INVALID_FORMAT",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => format!("Configuration file '{path}' not found."),
            ConfigError::InvalidFormat { details } => format!("Invalid setting: {details}."),
            ConfigError::InvalidValue { field, value } => {
                format!("Invalid value '{value}' for configuration field '{field}'.")
            }
            ConfigError::Parse(_) => {
                "Configuration file could not be parsed. Check the TOML syntax.".to_string()
            }
        }
    }
}

/// What went wrong for this particular query, prefixed by what was being
/// fetched. Empty terms get a prompt instead of the generic input message.
pub fn fetch_error_message(error: &CoreError, query: &SearchQuery) -> String {
    match (error, query.kind) {
        (CoreError::InvalidInput { .. }, SearchKind::Keyword) if query.term.is_empty() => {
            "Enter a keyword to search for.".to_string()
        }
        (CoreError::InvalidInput { .. }, SearchKind::Subreddit) if query.term.is_empty() => {
            "Enter a subreddit name to browse.".to_string()
        }
        (_, SearchKind::Keyword) => format!(
            "Searching Reddit for '{}' failed: {}",
            query.term,
            error.user_friendly_message()
        ),
        (_, SearchKind::Subreddit) => format!(
            "Loading r/{} failed: {}",
            query.term,
            error.user_friendly_message()
        ),
    }
}

/// Logs failed fetches under a fixed component name.
#[derive(Debug, Clone, Copy)]
pub struct ErrorReporter {
    component: &'static str,
}

impl ErrorReporter {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    /// Logs `error` with its code and returns the per-query message.
    pub fn report_fetch_error(&self, error: &CoreError, query: &SearchQuery) -> String {
        let message = fetch_error_message(error, query);
        error!(
            "[{}] {} fetch for '{}' failed ({}): {}",
            self.component,
            match query.kind {
                SearchKind::Keyword => "keyword",
                SearchKind::Subreddit => "subreddit",
            },
            query.term,
            error.error_code(),
            error
        );
        message
    }
}
