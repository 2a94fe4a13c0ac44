use insight_engine::word_cloud::DEFAULT_CLOUD_SIZE;
use insight_engine::{aggregate, compose, word_cloud, Aggregate};
use serde::Serialize;
use themetracer_core::{Post, Sentiment};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub sentiment: Sentiment,
    pub label: &'static str,
    pub value: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudWord {
    pub text: String,
    pub frequency: usize,
    pub sentiment: Sentiment,
    pub font_size_rem: f64,
    pub opacity: f64,
}

/// Everything the presentation layer renders, computed from one snapshot of
/// the results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub loading: bool,
    pub search_performed: bool,
    pub has_more: bool,
    pub results_label: Option<String>,
    pub sentiment_chart: Vec<ChartSlice>,
    pub word_cloud: Vec<CloudWord>,
    pub summary: Aggregate,
    pub insights: String,
    pub posts: Vec<Post>,
}

impl DashboardView {
    pub fn build(
        posts: &[Post],
        seed_idea: Option<&str>,
        loading: bool,
        search_performed: bool,
        has_more: bool,
    ) -> Self {
        let summary = aggregate(posts);

        Self {
            loading,
            search_performed,
            has_more,
            results_label: results_label(posts.len()),
            sentiment_chart: sentiment_chart(&summary),
            word_cloud: cloud_words(posts),
            insights: compose(posts, seed_idea),
            summary,
            posts: posts.to_vec(),
        }
    }
}

fn results_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 post found".to_string()),
        n => Some(format!("{n} posts found")),
    }
}

fn sentiment_chart(summary: &Aggregate) -> Vec<ChartSlice> {
    if summary.total == 0 {
        return Vec::new();
    }
    Sentiment::ALL
        .iter()
        .map(|&sentiment| ChartSlice {
            sentiment,
            label: sentiment.label(),
            value: summary.counts.get(sentiment),
            percent: summary.counts.percent(sentiment),
        })
        .collect()
}

fn cloud_words(posts: &[Post]) -> Vec<CloudWord> {
    let entries = word_cloud(posts, DEFAULT_CLOUD_SIZE);
    let max = entries.first().map(|e| e.frequency).unwrap_or(1);

    entries
        .into_iter()
        .map(|entry| {
            let factor = entry.scale(max);
            CloudWord {
                font_size_rem: 0.7 + factor,
                opacity: 0.3 + 0.7 * factor,
                text: entry.text,
                frequency: entry.frequency,
                sentiment: entry.dominant_sentiment,
            }
        })
        .collect()
}
