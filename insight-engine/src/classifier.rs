use crate::text::words;
use themetracer_core::{Post, RawPost, Sentiment};
use tracing::debug;

pub const POSITIVE_WORDS: [&str; 10] = [
    "good",
    "great",
    "awesome",
    "excellent",
    "amazing",
    "love",
    "best",
    "fantastic",
    "wonderful",
    "happy",
];

pub const NEGATIVE_WORDS: [&str; 10] = [
    "bad",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "hate",
    "disappointing",
    "poor",
    "frustrating",
    "annoying",
];

/// Classifies `text` by counting whole-word hits against the fixed positive
/// and negative lists. Equal counts (including none) are neutral.
pub fn classify(text: &str) -> Sentiment {
    let mut positive = 0usize;
    let mut negative = 0usize;

    for word in words(text) {
        if POSITIVE_WORDS.contains(&word.as_str()) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            negative += 1;
        }
    }

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Turns a raw source item into a [`Post`], classifying title and body once.
pub fn ingest(raw: RawPost) -> Post {
    let sentiment = classify(&format!("{} {}", raw.title, raw.content));
    debug!("Classified post {} as {}", raw.id, sentiment);
    Post::classified(raw, sentiment)
}
