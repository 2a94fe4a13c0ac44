use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse sentiment bucket. Declaration order is the tie-break order used
/// wherever buckets are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post as delivered by a source, before classification.
#[derive(Debug, Clone)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub subreddit: String,
    pub author: String,
    pub upvotes: u64,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

/// A classified post. Only constructible from a [`RawPost`] plus its
/// sentiment, and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    id: String,
    title: String,
    content: String,
    subreddit: String,
    author: String,
    upvotes: u64,
    comment_count: u64,
    sentiment: Sentiment,
    created_at: DateTime<Utc>,
    url: String,
}

impl Post {
    pub fn classified(raw: RawPost, sentiment: Sentiment) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            content: raw.content,
            subreddit: raw.subreddit,
            author: raw.author,
            upvotes: raw.upvotes,
            comment_count: raw.comment_count,
            sentiment,
            created_at: raw.created_at,
            url: raw.url,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn upvotes(&self) -> u64 {
        self.upvotes
    }

    pub fn comment_count(&self) -> u64 {
        self.comment_count
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Per-bucket tally over exactly one post collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Rounded share of `sentiment` in percent; 0 when the tally is empty.
    /// Each bucket is rounded on its own, so the three need not sum to 100.
    pub fn percent(&self, sentiment: Sentiment) -> u32 {
        percent_of(self.get(sentiment), self.total())
    }
}

/// `count / total * 100` rounded half-up, guarded against an empty total.
pub fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

/// One page of classified posts plus the opaque continuation token.
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub after: Option<String>,
}

impl PostPage {
    pub fn has_more(&self) -> bool {
        self.after.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Keyword,
    Subreddit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub kind: SearchKind,
}

impl SearchQuery {
    pub fn keyword(term: impl Into<String>) -> Self {
        Self {
            term: term.into().trim().to_string(),
            kind: SearchKind::Keyword,
        }
    }

    /// Builds a subreddit query, dropping a leading `r/` if present.
    pub fn subreddit(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        let name = name.strip_prefix("r/").unwrap_or(name);
        Self {
            term: name.to_string(),
            kind: SearchKind::Subreddit,
        }
    }

    pub fn is_subreddit(&self) -> bool {
        self.kind == SearchKind::Subreddit
    }
}
