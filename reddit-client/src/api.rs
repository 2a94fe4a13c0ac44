use chrono::{DateTime, TimeZone, Utc};
use insight_engine::classify;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use themetracer_core::{
    CoreError, Post, PostPage, RawPost, RedditApiError, SearchQuery, SourceConfig,
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};
use tracing::{debug, error, info};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PERMALINK_BASE: &str = "https://reddit.com";
const NO_CONTENT: &str = "[No content]";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: String,
    pub subreddit: String,
    pub permalink: String,
    pub created_utc: f64,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub num_comments: u64,
}

impl RedditPostData {
    /// Classifies `title + selftext` as delivered, then converts. Link posts
    /// are classified on their title alone.
    pub fn into_post(self) -> Post {
        let sentiment = classify(&format!("{} {}", self.title, self.selftext));
        debug!("Classified post {} as {}", self.id, sentiment);
        Post::classified(self.into_raw(), sentiment)
    }

    pub fn into_raw(self) -> RawPost {
        let content = if self.selftext.is_empty() {
            NO_CONTENT.to_string()
        } else {
            self.selftext
        };

        RawPost {
            id: self.id,
            title: self.title,
            content,
            subreddit: self.subreddit,
            author: self.author,
            upvotes: self.ups.max(0) as u64,
            comment_count: self.num_comments,
            created_at: created_at(self.created_utc),
            url: format!("{}{}", PERMALINK_BASE, self.permalink),
        }
    }
}

fn created_at(created_utc: f64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt((created_utc * 1000.0) as i64)
        .single()
        .unwrap_or_default()
}

/// Client for Reddit's public, unauthenticated JSON listings.
#[derive(Debug)]
pub struct RedditApiClient {
    http_client: Client,
    base_url: Url,
    user_agent: String,
}

impl RedditApiClient {
    pub fn new(user_agent: String) -> Result<Self, CoreError> {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent)
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, CoreError> {
        Self::with_base_url(&config.base_url, config.user_agent.clone())
    }

    pub fn with_base_url(base_url: &str, user_agent: String) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| CoreError::InvalidInput {
            message: format!("Invalid base URL {}: {}", base_url, e),
        })?;
        let user_agent = if user_agent.trim().is_empty() {
            DEFAULT_USER_AGENT.to_string()
        } else {
            user_agent
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            user_agent,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `/r/<name>/hot.json` for subreddits, `/search.json?q=` otherwise.
    pub fn listing_url(
        &self,
        query: &SearchQuery,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Url, CoreError> {
        if query.term.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "Search term must not be empty".to_string(),
            });
        }

        let mut url = self.base_url.clone();
        let limit = limit.to_string();
        if query.is_subreddit() {
            url.set_path(&format!("/r/{}/hot.json", query.term));
            url.query_pairs_mut().append_pair("limit", &limit);
        } else {
            url.set_path("/search.json");
            url.query_pairs_mut()
                .append_pair("q", &query.term)
                .append_pair("limit", &limit);
        }
        if let Some(after) = after {
            url.query_pairs_mut().append_pair("after", after);
        }
        Ok(url)
    }

    pub async fn fetch_posts(
        &self,
        query: &SearchQuery,
        limit: u32,
        after: Option<&str>,
    ) -> Result<PostPage, CoreError> {
        let url = self.listing_url(query, limit, after)?;
        info!(
            "Fetching Reddit {} '{}' (limit {}, after {})",
            if query.is_subreddit() { "subreddit" } else { "search" },
            query.term,
            limit,
            after.unwrap_or("none")
        );
        debug!("GET {}", url);

        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error fetching '{}': {}", query.term, e);
                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        check_status(response.status(), query)?;

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse Reddit listing: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse listing for '{}'", query.term),
            })
        })?;

        let after = listing.data.after;
        let posts: Vec<_> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into_post())
            .collect();

        info!("Retrieved {} posts for '{}'", posts.len(), query.term);
        Ok(PostPage { posts, after })
    }
}

/// Maps a non-success status to the matching error; success passes through.
pub fn check_status(status: StatusCode, query: &SearchQuery) -> Result<(), CoreError> {
    if status.is_success() {
        debug!("Request successful: {}", status);
        return Ok(());
    }

    error!("Request failed with status {} for '{}'", status, query.term);
    let err: CoreError = match status {
        StatusCode::NOT_FOUND if query.is_subreddit() => RedditApiError::SubredditNotFound {
            subreddit: query.term.clone(),
        }
        .into(),
        StatusCode::FORBIDDEN => RedditApiError::Forbidden {
            resource: query.term.clone(),
        }
        .into(),
        StatusCode::TOO_MANY_REQUESTS => RedditApiError::RateLimitExceeded.into(),
        s if s.is_server_error() => RedditApiError::ServerError {
            status_code: s.as_u16(),
        }
        .into(),
        s => CoreError::RequestFailed {
            message: format!("Reddit API error: {}", s.as_u16()),
            status_code: Some(s.as_u16()),
        },
    };
    Err(err)
}
