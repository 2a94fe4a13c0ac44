use crate::aggregator::{aggregate, keyword_frequency, rank_by_count, tally};
use crate::word_cloud::{word_cloud, DEFAULT_CLOUD_SIZE};
use crate::{compose, ingest, suggest_communities};
use chrono::{TimeZone, Utc};
use themetracer_core::{Post, RawPost, Sentiment};

fn raw_post(id: &str, title: &str, content: &str, subreddit: &str, upvotes: u64) -> RawPost {
    RawPost {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        subreddit: subreddit.to_string(),
        author: "test_user".to_string(),
        upvotes,
        comment_count: 3,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        url: format!("https://reddit.com/r/{subreddit}/comments/{id}"),
    }
}

fn post_with(sentiment: Sentiment, title: &str, subreddit: &str, upvotes: u64) -> Post {
    Post::classified(raw_post("p", title, "", subreddit, upvotes), sentiment)
}

fn mixed_posts() -> Vec<Post> {
    vec![
        post_with(Sentiment::Positive, "Rust compiler release notes", "rust", 1500),
        post_with(Sentiment::Negative, "Compiler errors everywhere", "programming", 20),
        post_with(Sentiment::Neutral, "Release schedule question", "rust", 300),
        post_with(Sentiment::Positive, "Compiler speed improvements", "rust", 2500),
    ]
}

#[test]
fn test_ingest_classifies_title_and_body() {
    let post = ingest(raw_post("a", "Weekly thread", "This update is awesome", "rust", 1));
    assert_eq!(post.sentiment(), Sentiment::Positive);

    let post = ingest(raw_post("b", "Terrible update", "really bad, not good", "rust", 1));
    assert_eq!(post.sentiment(), Sentiment::Negative);
}

#[test]
fn test_counts_sum_to_collection_size() {
    let posts = mixed_posts();
    let summary = aggregate(&posts);
    assert_eq!(summary.counts.total(), posts.len());
    assert_eq!(summary.counts.positive, 2);
    assert_eq!(summary.counts.neutral, 1);
    assert_eq!(summary.counts.negative, 1);
}

#[test]
fn test_counts_use_stored_sentiment() {
    // Title text is positive but the stored sentiment is negative.
    let posts = vec![post_with(Sentiment::Negative, "great great great", "rust", 0)];
    assert_eq!(aggregate(&posts).counts.negative, 1);
}

#[test]
fn test_aggregate_empty() {
    let summary = aggregate(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.counts.total(), 0);
    assert!(summary.top_groups.is_empty());
    assert!(summary.top_keywords.is_empty());
    assert_eq!(summary.high_engagement_percent, 0);
}

#[test]
fn test_top_groups_ranked_with_first_seen_ties() {
    let posts = vec![
        post_with(Sentiment::Neutral, "one", "beta", 0),
        post_with(Sentiment::Neutral, "two", "alpha", 0),
        post_with(Sentiment::Neutral, "three", "gamma", 0),
        post_with(Sentiment::Neutral, "four", "delta", 0),
        post_with(Sentiment::Neutral, "five", "gamma", 0),
    ];
    let summary = aggregate(&posts);
    let names: Vec<&str> = summary.top_groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["gamma", "beta", "alpha"]);
    assert_eq!(summary.top_groups[0].label(), "r/gamma (2 posts)");
}

#[test]
fn test_top_keywords_filtering_and_limit() {
    let posts = vec![
        post_with(Sentiment::Neutral, "What about this compiler? The new compiler", "a", 0),
        post_with(Sentiment::Neutral, "cargo build times with cargo", "a", 0),
        post_with(Sentiment::Neutral, "async traits, macros, lifetimes, borrow", "a", 0),
    ];
    let summary = aggregate(&posts);
    assert_eq!(
        summary.top_keywords,
        vec!["compiler", "cargo", "build", "times", "async", "traits"]
    );
    assert!(!summary.top_keywords.iter().any(|w| w == "what" || w == "about"));
    assert!(!summary.top_keywords.iter().any(|w| w == "new"));
}

#[test]
fn test_keyword_frequency_first_seen_order() {
    let freq = keyword_frequency(["zeta alpha", "alpha zeta omega"]);
    assert_eq!(
        freq,
        vec![
            ("zeta".to_string(), 2),
            ("alpha".to_string(), 2),
            ("omega".to_string(), 1)
        ]
    );
}

#[test]
fn test_rank_by_count_is_stable() {
    let ranked = rank_by_count(tally(["b", "a", "c", "a", "b", "d"]), 3);
    assert_eq!(
        ranked,
        vec![
            ("b".to_string(), 2),
            ("a".to_string(), 2),
            ("c".to_string(), 1)
        ]
    );
}

#[test]
fn test_high_engagement_percent_rounds() {
    let posts = vec![
        post_with(Sentiment::Neutral, "x", "a", 1001),
        post_with(Sentiment::Neutral, "x", "a", 1000),
        post_with(Sentiment::Neutral, "x", "a", 5),
    ];
    assert_eq!(aggregate(&posts).high_engagement_percent, 33);
}

#[test]
fn test_word_cloud_dominant_sentiment_tie_prefers_positive() {
    let posts = vec![
        post_with(Sentiment::Negative, "shared shared", "a", 0),
        post_with(Sentiment::Positive, "shared shared", "a", 0),
        post_with(Sentiment::Neutral, "neutralterm", "a", 0),
    ];
    let cloud = word_cloud(&posts, DEFAULT_CLOUD_SIZE);
    assert_eq!(cloud[0].text, "shared");
    assert_eq!(cloud[0].frequency, 4);
    assert_eq!(cloud[0].dominant_sentiment, Sentiment::Positive);
    assert_eq!(cloud[1].dominant_sentiment, Sentiment::Neutral);
}

#[test]
fn test_word_cloud_filters_and_scales() {
    let posts = vec![Post::classified(
        raw_post("w", "The ok thing", "it is a tremendouslylongword thing", "a", 0),
        Sentiment::Neutral,
    )];
    let cloud = word_cloud(&posts, DEFAULT_CLOUD_SIZE);
    let texts: Vec<&str> = cloud.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["thing"]);
    assert!((cloud[0].scale(2) - 1.0).abs() < 1e-9);
    assert!((cloud[0].scale(4) - 0.85).abs() < 1e-9);
    assert!(word_cloud(&[], DEFAULT_CLOUD_SIZE).is_empty());
}

#[test]
fn test_compose_empty_without_idea() {
    assert_eq!(compose(&[], None), "");
    assert_eq!(compose(&[], Some("   ")), "");
}

#[test]
fn test_compose_prefetch_with_idea() {
    let idea = "a pet-sitting app";
    let insight = compose(&[], Some(idea));
    assert!(insight.contains(idea));
    assert!(insight.contains("pending"));

    let communities = suggest_communities(idea);
    assert!(communities.len() >= 3);
    for community in &communities {
        assert!(insight.contains(&format!("- r/{community}")));
    }
}

#[test]
fn test_compose_all_positive() {
    let posts = vec![
        post_with(Sentiment::Positive, "Loving the new release", "rust", 10),
        post_with(Sentiment::Positive, "Best release ever", "rust", 20),
    ];
    let insight = compose(&posts, None);
    assert!(insight.contains("predominantly positive (100%)"));
    assert!(insight.contains("with 100% positive, 0% neutral, and 0% negative posts."));
    assert!(insight.contains("Most posts come from r/rust (2 posts)."));
    assert!(insight.contains("Key topics include: release"));
    assert!(insight.ends_with("relatively low engagement based on upvote patterns."));
}

#[test]
fn test_compose_tie_reads_neutral() {
    let posts = vec![
        post_with(Sentiment::Positive, "x", "a", 0),
        post_with(Sentiment::Negative, "y", "a", 0),
    ];
    let insight = compose(&posts, None);
    assert!(insight.contains("mostly neutral (0%)"));
    assert!(insight.contains("with 50% positive, 0% neutral, and 50% negative posts."));
}

#[test]
fn test_compose_percentages_rounded_independently() {
    let posts = vec![
        post_with(Sentiment::Positive, "x", "a", 0),
        post_with(Sentiment::Neutral, "x", "a", 0),
        post_with(Sentiment::Negative, "x", "a", 0),
    ];
    // 33 + 33 + 33 = 99
    let insight = compose(&posts, None);
    assert!(insight.contains("with 33% positive, 33% neutral, and 33% negative posts."));
}

#[test]
fn test_compose_engagement_tiers() {
    let high = vec![
        post_with(Sentiment::Neutral, "x", "a", 5000),
        post_with(Sentiment::Neutral, "x", "a", 5),
    ];
    assert!(compose(&high, None)
        .contains("high user engagement with 50% of posts having significant upvotes."));

    let mut moderate: Vec<Post> = (0..4)
        .map(|_| post_with(Sentiment::Neutral, "x", "a", 5))
        .collect();
    moderate.push(post_with(Sentiment::Neutral, "x", "a", 5000));
    assert!(compose(&moderate, None).contains("moderate user engagement"));
}

#[test]
fn test_compose_with_idea_adds_guidance() {
    let mut posts = mixed_posts();
    posts.push(Post::classified(
        raw_post("c", "Looking for an alternative", "I switched from another tool", "rust", 10),
        Sentiment::Neutral,
    ));
    let insight = compose(&posts, Some("compiler dashboard"));

    assert!(insight.starts_with("## Market Signals for **compiler dashboard**"));
    assert!(insight.contains("good outreach targets for compiler dashboard"));
    assert!(insight.contains("Positioning compiler dashboard around these themes"));
    assert!(insight.contains("## Competitive Landscape"));
    assert!(insight.contains("1 of 5 posts compare existing options"));
    assert!(insight.contains("**alternative**, **switched**"));
}

#[test]
fn test_compose_with_idea_skips_competition_when_absent() {
    let insight = compose(&mixed_posts(), Some("compiler dashboard"));
    assert!(!insight.contains("Competitive Landscape"));
}

#[test]
fn test_outputs_are_idempotent() {
    let posts = mixed_posts();
    assert_eq!(aggregate(&posts), aggregate(&posts));
    assert_eq!(compose(&posts, None), compose(&posts, None));
    assert_eq!(
        compose(&posts, Some("an idea")),
        compose(&posts, Some("an idea"))
    );
}

#[test]
fn test_idea_differentiation_follows_engagement_tier() {
    let high = vec![
        post_with(Sentiment::Neutral, "x", "a", 5000),
        post_with(Sentiment::Neutral, "x", "a", 5),
    ];
    let insight = compose(&high, Some("widget"));
    assert!(insight.contains("widget needs a clear differentiator"));
    assert!(!insight.contains("focused niche"));
    assert!(!insight.contains("underserved space"));

    let mut moderate: Vec<Post> = (0..4)
        .map(|_| post_with(Sentiment::Neutral, "x", "a", 5))
        .collect();
    moderate.push(post_with(Sentiment::Neutral, "x", "a", 5000));
    let insight = compose(&moderate, Some("widget"));
    assert!(insight.contains("a focused niche can set widget apart"));
    assert!(!insight.contains("clear differentiator"));
    assert!(!insight.contains("underserved space"));

    let low = vec![post_with(Sentiment::Neutral, "x", "a", 5)];
    let insight = compose(&low, Some("widget"));
    assert!(insight.contains("underserved space where widget could stand out early"));
    assert!(!insight.contains("clear differentiator"));
    assert!(!insight.contains("focused niche"));
}

#[test]
fn test_idea_reception_follows_dominant_sentiment() {
    let positive = vec![post_with(Sentiment::Positive, "x", "a", 5)];
    let insight = compose(&positive, Some("widget"));
    assert!(insight.contains("The receptive mood is a good sign for widget"));

    let negative = vec![post_with(Sentiment::Negative, "x", "a", 5)];
    let insight = compose(&negative, Some("widget"));
    assert!(insight.contains("predominantly negative (100%)"));
    assert!(insight.contains("That frustration is an opening for widget"));
    assert!(!insight.contains("receptive mood"));

    // A positive/negative tie reads as neutral.
    let tie = vec![
        post_with(Sentiment::Positive, "x", "a", 5),
        post_with(Sentiment::Negative, "y", "a", 5),
    ];
    let insight = compose(&tie, Some("widget"));
    assert!(insight.contains("mostly neutral (0%)"));
    assert!(insight.contains("so widget has room to shape the conversation"));
    assert!(!insight.contains("receptive mood"));
    assert!(!insight.contains("frustration"));
}
