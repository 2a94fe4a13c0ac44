use chrono::{Duration as ChronoDuration, Utc};
use fastrand::Rng;
use insight_engine::ingest;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use themetracer_core::{CoreError, PostPage, RawPost, SearchQuery, Sentiment, SourceConfig};
use tracing::info;

const MIN_POSTS: usize = 3;
const MAX_POSTS: usize = 10;
const MORE_PAGES_PROBABILITY: f64 = 0.7;
const MAX_AGE_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const SEARCH_SUBREDDITS: [&str; 5] = ["technology", "programming", "design", "apple", "askreddit"];

const POSITIVE_ADJECTIVES: [&str; 5] = ["Amazing", "Incredible", "Awesome", "Great", "Excellent"];
const NEUTRAL_ADJECTIVES: [&str; 5] = [
    "Interesting",
    "Noteworthy",
    "Considerable",
    "Standard",
    "Average",
];
const NEGATIVE_ADJECTIVES: [&str; 5] = [
    "Terrible",
    "Awful",
    "Disappointing",
    "Frustrating",
    "Poor",
];

const AUTHOR_PREFIXES: [&str; 7] = ["cool", "super", "tech", "code", "reddit", "random", "mega"];
const AUTHOR_SUFFIXES: [&str; 7] = ["user", "coder", "dev", "fan", "guru", "pro", "enthusiast"];

/// Generates plausible posts locally, for demos and offline use.
#[derive(Debug)]
pub struct SimulatedSource {
    delay: Duration,
    seed: Option<u64>,
    calls: AtomicU64,
}

impl SimulatedSource {
    pub fn new(delay: Duration, seed: Option<u64>) -> Self {
        Self {
            delay,
            seed,
            calls: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(
            Duration::from_millis(config.simulated_delay_ms),
            config.simulated_seed,
        )
    }

    /// Every call draws from its own generator; with a seed the sequence of
    /// pages is reproducible.
    fn next_rng(&self) -> Rng {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => Rng::with_seed(seed.wrapping_add(call)),
            None => Rng::new(),
        }
    }

    pub async fn fetch_posts(
        &self,
        query: &SearchQuery,
        limit: u32,
        after: Option<&str>,
    ) -> Result<PostPage, CoreError> {
        if query.term.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "Search term must not be empty".to_string(),
            });
        }

        info!(
            "Fetching simulated {} '{}' (limit {}, after {})",
            if query.is_subreddit() { "subreddit" } else { "search" },
            query.term,
            limit,
            after.unwrap_or("none")
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut rng = self.next_rng();
        let count = rng
            .usize(MIN_POSTS..=MAX_POSTS)
            .min(limit.max(1) as usize);

        let posts = (0..count)
            .map(|i| ingest(generate_post(&mut rng, query, i)))
            .collect();

        let after = (rng.f64() < MORE_PAGES_PROBABILITY)
            .then(|| format!("t3_{}", random_token(&mut rng, 8)));

        Ok(PostPage { posts, after })
    }
}

fn generate_post(rng: &mut Rng, query: &SearchQuery, index: usize) -> RawPost {
    let tone = Sentiment::ALL[rng.usize(..Sentiment::ALL.len())];
    let subreddit = if query.is_subreddit() {
        query.term.clone()
    } else {
        let choice = rng.usize(..=SEARCH_SUBREDDITS.len());
        SEARCH_SUBREDDITS
            .get(choice)
            .map(|s| s.to_string())
            .unwrap_or_else(|| query.term.to_lowercase())
    };

    let now = Utc::now();
    let age = ChronoDuration::milliseconds(rng.i64(0..MAX_AGE_MILLIS));

    RawPost {
        id: format!(
            "post-{}-{}-{}",
            now.timestamp_millis(),
            index,
            random_token(rng, 3)
        ),
        title: generate_title(rng, &query.term, tone),
        content: generate_content(rng, &query.term, tone),
        url: format!(
            "https://reddit.com/r/{}/comments/{}",
            subreddit,
            random_token(rng, 6)
        ),
        subreddit,
        author: generate_author(rng),
        upvotes: rng.u64(0..10_000),
        comment_count: rng.u64(0..500),
        created_at: now - age,
    }
}

fn pick<'a>(rng: &mut Rng, items: &[&'a str]) -> &'a str {
    items[rng.usize(..items.len())]
}

fn generate_title(rng: &mut Rng, query: &str, tone: Sentiment) -> String {
    let adjectives = match tone {
        Sentiment::Positive => &POSITIVE_ADJECTIVES,
        Sentiment::Neutral => &NEUTRAL_ADJECTIVES,
        Sentiment::Negative => &NEGATIVE_ADJECTIVES,
    };
    let adjective = pick(rng, adjectives);
    let lower = adjective.to_lowercase();

    match rng.usize(..6) {
        0 => format!("{adjective} experiences with {query}"),
        1 => format!("What does everyone think about {query}? It's {lower}!"),
        2 => format!("{query} - {adjective} new developments"),
        3 => format!("{adjective} discussion about {query}"),
        4 => format!("{query} updates - {lower} news"),
        _ => format!("Is {query} really as {lower} as they say?"),
    }
}

fn generate_content(rng: &mut Rng, query: &str, tone: Sentiment) -> String {
    let fragments: [String; 5] = match tone {
        Sentiment::Positive => [
            format!("I've had a fantastic experience with {query}."),
            format!("{query} has improved so much recently."),
            format!("The advancements in {query} are truly impressive."),
            format!("I'm really optimistic about where {query} is headed."),
            format!("{query} has exceeded my expectations in every way."),
        ],
        Sentiment::Neutral => [
            format!("{query} has some pros and cons."),
            format!("I've been following {query} for a while now."),
            format!("{query} seems to be developing at a steady pace."),
            format!("There are mixed opinions about {query} in the community."),
            format!("{query} is neither amazing nor terrible, just okay."),
        ],
        Sentiment::Negative => [
            format!("I've been really disappointed with {query} lately."),
            format!("{query} has so many issues that need to be fixed."),
            format!("The direction {query} is taking concerns me."),
            format!("{query} hasn't lived up to the hype at all."),
            format!("I expected much more from {query}."),
        ],
    };

    let count = rng.usize(2..=3);
    let selected: Vec<&str> = (0..count)
        .map(|_| fragments[rng.usize(..fragments.len())].as_str())
        .collect();

    format!(
        "{} What do you all think about {query}? I'd love to hear your experiences.",
        selected.join(" ")
    )
}

fn generate_author(rng: &mut Rng) -> String {
    let prefix = pick(rng, &AUTHOR_PREFIXES);
    let suffix = pick(rng, &AUTHOR_SUFFIXES);
    format!("{}_{}{}", prefix, suffix, rng.u32(0..1000))
}

fn random_token(rng: &mut Rng, len: usize) -> String {
    (0..len)
        .map(|_| TOKEN_ALPHABET[rng.usize(..TOKEN_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_engine::classify;

    fn source(seed: u64) -> SimulatedSource {
        SimulatedSource::new(Duration::ZERO, Some(seed))
    }

    #[tokio::test]
    async fn test_page_size_and_classification() {
        let page = source(42)
            .fetch_posts(&SearchQuery::keyword("Rust"), 10, None)
            .await
            .unwrap();

        assert!((MIN_POSTS..=MAX_POSTS).contains(&page.posts.len()));
        for post in &page.posts {
            let text = format!("{} {}", post.title(), post.content());
            assert_eq!(post.sentiment(), classify(&text));
            assert!(post.url().starts_with("https://reddit.com/r/"));
            assert_eq!(post.author().split('_').count(), 2);
            assert!(post.upvotes() < 10_000);
        }
        if let Some(after) = &page.after {
            assert!(after.starts_with("t3_"));
            assert_eq!(after.len(), 11);
        }
    }

    #[tokio::test]
    async fn test_subreddit_query_pins_subreddit() {
        let page = source(7)
            .fetch_posts(&SearchQuery::subreddit("r/rust"), 10, None)
            .await
            .unwrap();
        assert!(page.posts.iter().all(|p| p.subreddit() == "rust"));
    }

    #[tokio::test]
    async fn test_seeded_output_is_reproducible() {
        let query = SearchQuery::keyword("gadgets");
        let first = source(99).fetch_posts(&query, 10, None).await.unwrap();
        let second = source(99).fetch_posts(&query, 10, None).await.unwrap();

        let titles = |page: &PostPage| -> Vec<String> {
            page.posts.iter().map(|p| p.title().to_string()).collect()
        };
        assert_eq!(titles(&first), titles(&second));
        assert_eq!(first.after, second.after);
    }

    #[tokio::test]
    async fn test_limit_caps_page() {
        let page = source(3)
            .fetch_posts(&SearchQuery::keyword("design"), 2, None)
            .await
            .unwrap();
        assert!(page.posts.len() <= 2);
    }

    #[tokio::test]
    async fn test_empty_term_rejected() {
        let result = source(1)
            .fetch_posts(&SearchQuery::keyword(""), 10, None)
            .await;
        assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
    }
}
