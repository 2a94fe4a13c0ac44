use thiserror::Error;

/// Everything a fetch, a config load or the CLI can fail with.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Reddit error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Listing request failed: {message}")]
    RequestFailed {
        message: String,
        status_code: Option<u16>,
    },
}

/// Statuses and payload problems specific to Reddit's JSON listings.
#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("listing rate limited (HTTP 429)")]
    RateLimitExceeded,

    #[error("listing for '{resource}' is forbidden (HTTP 403)")]
    Forbidden { resource: String },

    #[error("r/{subreddit} does not exist or is private")]
    SubredditNotFound { subreddit: String },

    #[error("listing request timed out")]
    RequestTimeout,

    #[error("listing body could not be decoded: {details}")]
    InvalidResponse { details: String },

    #[error("Reddit returned HTTP {status_code}")]
    ServerError { status_code: u16 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {path} does not exist")]
    FileNotFound { path: String },

    #[error("malformed setting: {details}")]
    InvalidFormat { details: String },

    #[error("{field} cannot be '{value}'")]
    InvalidValue { field: String, value: String },

    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
