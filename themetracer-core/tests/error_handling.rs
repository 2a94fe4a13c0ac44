use themetracer_core::{
    fetch_error_message, ConfigError, CoreError, ErrorExt, ErrorReporter, RedditApiError,
    SearchQuery,
};

#[test]
fn test_error_codes_come_from_the_innermost_error() {
    let limited = CoreError::RedditApi(RedditApiError::RateLimitExceeded);
    assert_eq!(limited.error_code(), "REDDIT_RATE_LIMIT");

    let bad_page_size = CoreError::Config(ConfigError::InvalidValue {
        field: "source.page_size".to_string(),
        value: "0".to_string(),
    });
    assert_eq!(bad_page_size.error_code(), "CONFIG_INVALID_VALUE");

    let teapot = CoreError::RequestFailed {
        message: "Reddit API error: 418".to_string(),
        status_code: Some(418),
    };
    assert_eq!(teapot.error_code(), "REQUEST_FAILED");
    assert_eq!(teapot.user_friendly_message(), "Reddit answered with HTTP 418.");
}

#[test]
fn test_user_friendly_messages() {
    let not_found = CoreError::RedditApi(RedditApiError::SubredditNotFound {
        subreddit: "doesnotexist".to_string(),
    });
    assert_eq!(
        not_found.user_friendly_message(),
        "Subreddit 'doesnotexist' not found or is private."
    );

    let bad_page_size = CoreError::Config(ConfigError::InvalidValue {
        field: "source.page_size".to_string(),
        value: "0".to_string(),
    });
    let message = bad_page_size.user_friendly_message();
    assert!(message.contains("source.page_size"));
    assert!(message.contains("'0'"));
}

#[test]
fn test_fetch_message_names_the_query() {
    let error = CoreError::RedditApi(RedditApiError::ServerError { status_code: 503 });

    assert_eq!(
        fetch_error_message(&error, &SearchQuery::keyword("rust")),
        "Searching Reddit for 'rust' failed: Reddit is having trouble (HTTP 503)."
    );
    assert_eq!(
        fetch_error_message(&error, &SearchQuery::subreddit("r/rust")),
        "Loading r/rust failed: Reddit is having trouble (HTTP 503)."
    );
}

#[test]
fn test_fetch_message_prompts_for_empty_terms() {
    let error = CoreError::InvalidInput {
        message: "Search term must not be empty".to_string(),
    };

    assert_eq!(
        fetch_error_message(&error, &SearchQuery::keyword("   ")),
        "Enter a keyword to search for."
    );
    assert_eq!(
        fetch_error_message(&error, &SearchQuery::subreddit("r/")),
        "Enter a subreddit name to browse."
    );
}

#[test]
fn test_reporter_returns_the_fetch_message() {
    let reporter = ErrorReporter::new("test");
    let query = SearchQuery::subreddit("nope");
    let error = CoreError::RedditApi(RedditApiError::SubredditNotFound {
        subreddit: "nope".to_string(),
    });

    assert_eq!(
        reporter.report_fetch_error(&error, &query),
        fetch_error_message(&error, &query)
    );
}
