use crate::text::{words, KEYWORD_STOPWORDS};
use serde::Serialize;
use std::collections::HashMap;
use themetracer_core::{percent_of, Post, SentimentCounts};

pub const TOP_GROUPS: usize = 3;
pub const TOP_KEYWORDS: usize = 6;
pub const MIN_KEYWORD_LEN: usize = 4;
/// Upvote count a post must exceed to count as high engagement.
pub const HIGH_ENGAGEMENT_UPVOTES: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

impl GroupCount {
    pub fn label(&self) -> String {
        format!("r/{} ({} posts)", self.name, self.count)
    }
}

/// Summary statistics over one post collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub total: usize,
    pub counts: SentimentCounts,
    pub top_groups: Vec<GroupCount>,
    pub top_keywords: Vec<String>,
    pub high_engagement_percent: u32,
}

pub fn aggregate(posts: &[Post]) -> Aggregate {
    let mut counts = SentimentCounts::default();
    for post in posts {
        counts.record(post.sentiment());
    }

    let top_groups = rank_by_count(tally(posts.iter().map(|p| p.subreddit())), TOP_GROUPS)
        .into_iter()
        .map(|(name, count)| GroupCount { name, count })
        .collect();

    let top_keywords = rank_by_count(keyword_frequency(posts.iter().map(|p| p.title())), TOP_KEYWORDS)
        .into_iter()
        .map(|(word, _)| word)
        .collect();

    let high_engagement = posts
        .iter()
        .filter(|p| p.upvotes() > HIGH_ENGAGEMENT_UPVOTES)
        .count();

    Aggregate {
        total: posts.len(),
        counts,
        top_groups,
        top_keywords,
        high_engagement_percent: percent_of(high_engagement, posts.len()),
    }
}

/// Word counts over `texts`, keeping words of at least four characters that
/// are not stopwords. Ordered by first appearance.
pub fn keyword_frequency<'a, I>(texts: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    tally(
        texts
            .into_iter()
            .flat_map(words)
            .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
            .filter(|w| !KEYWORD_STOPWORDS.contains(&w.as_str())),
    )
}

/// Counts occurrences, preserving first-seen order.
pub fn tally<I, S>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = item.as_ref();
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key.to_string(), order.len());
                order.push((key.to_string(), 1));
            }
        }
    }

    order
}

/// Sorts descending by count and keeps the first `limit`. The sort is stable,
/// so equal counts keep their incoming order.
pub fn rank_by_count<T>(mut entries: Vec<(T, usize)>, limit: usize) -> Vec<(T, usize)> {
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(limit);
    entries
}
