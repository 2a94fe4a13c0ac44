use crate::aggregator::rank_by_count;
use crate::text::{words, CLOUD_STOPWORDS};
use serde::Serialize;
use std::collections::HashMap;
use themetracer_core::{Post, Sentiment, SentimentCounts};

pub const DEFAULT_CLOUD_SIZE: usize = 30;
const MIN_WORD_LEN: usize = 3;
const MAX_WORD_LEN: usize = 15;
const MIN_SCALE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudEntry {
    pub text: String,
    pub frequency: usize,
    pub dominant_sentiment: Sentiment,
}

impl WordCloudEntry {
    /// Relative display size in `[0.7, 1.0]` against the most frequent word.
    pub fn scale(&self, max_frequency: usize) -> f64 {
        let max = max_frequency.max(1) as f64;
        MIN_SCALE + (1.0 - MIN_SCALE) * (self.frequency as f64 / max)
    }
}

/// The `limit` most frequent words across titles and bodies, each tagged
/// with the sentiment of the posts it appears in most often.
pub fn word_cloud(posts: &[Post], limit: usize) -> Vec<WordCloudEntry> {
    let mut order: Vec<(String, SentimentCounts)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for post in posts {
        let text = format!("{} {}", post.title(), post.content());
        for word in words(&text) {
            let len = word.chars().count();
            if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len)
                || CLOUD_STOPWORDS.contains(&word.as_str())
            {
                continue;
            }
            let slot = match index.get(&word) {
                Some(&i) => i,
                None => {
                    index.insert(word.clone(), order.len());
                    order.push((word, SentimentCounts::default()));
                    order.len() - 1
                }
            };
            order[slot].1.record(post.sentiment());
        }
    }

    let ranked = order
        .into_iter()
        .map(|(text, counts)| ((text, counts), counts.total()))
        .collect();

    rank_by_count(ranked, limit)
        .into_iter()
        .map(|((text, counts), frequency)| WordCloudEntry {
            text,
            frequency,
            dominant_sentiment: dominant(&counts),
        })
        .collect()
}

/// Highest bucket; on a tie the earlier-declared sentiment wins.
fn dominant(counts: &SentimentCounts) -> Sentiment {
    let mut best = Sentiment::Positive;
    for sentiment in Sentiment::ALL {
        if counts.get(sentiment) > counts.get(best) {
            best = sentiment;
        }
    }
    best
}
