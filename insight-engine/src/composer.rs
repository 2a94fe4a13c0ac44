//! Narrative summaries of a post collection.
//!
//! The output uses a small markup subset understood by the dashboard:
//! paragraphs separated by blank lines, `## ` headings, `- ` bullets and
//! `**bold**` spans. Sentiment percentages are rounded per bucket and are not
//! forced to sum to 100.

use crate::aggregator::{aggregate, Aggregate};
use crate::communities::suggest_communities;
use crate::text::words;
use themetracer_core::{Post, Sentiment};

const HIGH_ENGAGEMENT_THRESHOLD: u32 = 30;
const MODERATE_ENGAGEMENT_THRESHOLD: u32 = 10;

/// Single-word terms that signal a post is comparing products or services.
const COMPETITIVE_TERMS: [&str; 10] = [
    "alternative",
    "alternatives",
    "competitor",
    "competitors",
    "competition",
    "versus",
    "vs",
    "instead",
    "switched",
    "switching",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engagement {
    High,
    Moderate,
    Low,
}

impl Engagement {
    fn from_percent(percent: u32) -> Self {
        if percent > HIGH_ENGAGEMENT_THRESHOLD {
            Engagement::High
        } else if percent > MODERATE_ENGAGEMENT_THRESHOLD {
            Engagement::Moderate
        } else {
            Engagement::Low
        }
    }
}

/// Builds the insight text for `posts`, optionally framed around a seed idea.
/// A blank idea is treated as no idea.
pub fn compose(posts: &[Post], seed_idea: Option<&str>) -> String {
    let idea = seed_idea.map(str::trim).filter(|idea| !idea.is_empty());

    match (posts.is_empty(), idea) {
        (true, None) => String::new(),
        (true, Some(idea)) => compose_prefetch(idea),
        (false, None) => compose_baseline(&aggregate(posts)),
        (false, Some(idea)) => compose_for_idea(posts, &aggregate(posts), idea),
    }
}

fn compose_prefetch(idea: &str) -> String {
    let communities = suggest_communities(idea);
    let bullets: Vec<String> = communities.iter().map(|c| format!("- r/{c}")).collect();

    let sections = [
        "## Your Idea".to_string(),
        format!("**{idea}**"),
        "## Suggested Communities".to_string(),
        format!(
            "These communities are likely to discuss topics related to your idea:\n{}",
            bullets.join("\n")
        ),
        "## Next Steps".to_string(),
        format!(
            "Data collection is pending. Search one of the suggested communities to gather \
             posts, and the sentiment and engagement analysis for **{idea}** will appear here."
        ),
    ];
    sections.join("\n\n")
}

fn compose_baseline(summary: &Aggregate) -> String {
    let mut paragraphs = vec![sentiment_sentence(summary).1];
    if let Some(groups) = groups_sentence(summary) {
        paragraphs.push(groups);
    }
    if let Some(topics) = topics_sentence(summary) {
        paragraphs.push(topics);
    }
    paragraphs.push(engagement_sentence(summary));
    paragraphs.join("\n\n")
}

fn compose_for_idea(posts: &[Post], summary: &Aggregate, idea: &str) -> String {
    let (dominant, sentiment) = sentiment_sentence(summary);
    let mut paragraphs = vec![
        format!("## Market Signals for **{idea}**"),
        format!("{sentiment} {}", reception_clause(dominant, idea)),
    ];

    if let Some(groups) = groups_sentence(summary) {
        paragraphs.push(format!(
            "{groups} These communities are good outreach targets for {idea}."
        ));
    }
    if let Some(topics) = topics_sentence(summary) {
        paragraphs.push(format!(
            "{topics} Positioning {idea} around these themes connects it with what people \
             already discuss."
        ));
    }

    let engagement = Engagement::from_percent(summary.high_engagement_percent);
    paragraphs.push(format!(
        "{} {}",
        engagement_sentence(summary),
        differentiation_clause(engagement, idea)
    ));

    if let Some(landscape) = competitive_paragraph(posts, idea) {
        paragraphs.push("## Competitive Landscape".to_string());
        paragraphs.push(landscape);
    }

    paragraphs.join("\n\n")
}

/// Returns the dominant bucket alongside the sentence. The comparison chain
/// checks positive first, then negative; anything else reads as neutral.
fn sentiment_sentence(summary: &Aggregate) -> (Sentiment, String) {
    let positive = summary.counts.percent(Sentiment::Positive);
    let neutral = summary.counts.percent(Sentiment::Neutral);
    let negative = summary.counts.percent(Sentiment::Negative);

    let (dominant, lead) = if positive > negative && positive > neutral {
        (
            Sentiment::Positive,
            format!("predominantly positive ({positive}%)"),
        )
    } else if negative > positive && negative > neutral {
        (
            Sentiment::Negative,
            format!("predominantly negative ({negative}%)"),
        )
    } else {
        (Sentiment::Neutral, format!("mostly neutral ({neutral}%)"))
    };

    let sentence = format!(
        "Based on the analysis of {} posts, the overall sentiment is {lead}, with {positive}% \
         positive, {neutral}% neutral, and {negative}% negative posts.",
        summary.total
    );
    (dominant, sentence)
}

fn groups_sentence(summary: &Aggregate) -> Option<String> {
    if summary.top_groups.is_empty() {
        return None;
    }
    let labels: Vec<String> = summary.top_groups.iter().map(|g| g.label()).collect();
    Some(format!("Most posts come from {}.", labels.join(", ")))
}

fn topics_sentence(summary: &Aggregate) -> Option<String> {
    if summary.top_keywords.is_empty() {
        return None;
    }
    Some(format!(
        "Key topics include: {}.",
        summary.top_keywords.join(", ")
    ))
}

fn engagement_sentence(summary: &Aggregate) -> String {
    let percent = summary.high_engagement_percent;
    match Engagement::from_percent(percent) {
        Engagement::High => format!(
            "This topic shows high user engagement with {percent}% of posts having significant \
             upvotes."
        ),
        Engagement::Moderate => {
            "This topic shows moderate user engagement with some highly upvoted content."
                .to_string()
        }
        Engagement::Low => {
            "Most posts on this topic have relatively low engagement based on upvote patterns."
                .to_string()
        }
    }
}

fn reception_clause(dominant: Sentiment, idea: &str) -> String {
    match dominant {
        Sentiment::Positive => format!(
            "The receptive mood is a good sign for {idea}, since people here are open to new \
             solutions."
        ),
        Sentiment::Negative => format!(
            "That frustration is an opening for {idea} if it directly addresses the pain points \
             people describe."
        ),
        Sentiment::Neutral => format!(
            "Opinions are not settled yet, so {idea} has room to shape the conversation."
        ),
    }
}

fn differentiation_clause(engagement: Engagement, idea: &str) -> String {
    match engagement {
        Engagement::High => format!(
            "With an audience this engaged, {idea} needs a clear differentiator to stand out \
             from popular existing content."
        ),
        Engagement::Moderate => format!(
            "The audience is active but not crowded, so a focused niche can set {idea} apart."
        ),
        Engagement::Low => format!(
            "Low engagement suggests an underserved space where {idea} could stand out early, \
             though demand should be validated first."
        ),
    }
}

/// Counts posts that use comparison language and names the terms found.
fn competitive_paragraph(posts: &[Post], idea: &str) -> Option<String> {
    let mut mentioning = 0usize;
    let mut terms: Vec<String> = Vec::new();

    for post in posts {
        let text = format!("{} {}", post.title(), post.content());
        let mut found = false;
        for word in words(&text) {
            if COMPETITIVE_TERMS.contains(&word.as_str()) {
                found = true;
                if !terms.contains(&word) {
                    terms.push(word);
                }
            }
        }
        if found {
            mentioning += 1;
        }
    }

    if mentioning == 0 {
        return None;
    }

    Some(format!(
        "{mentioning} of {} posts compare existing options (mentions of {}). Study what users \
         weigh against each other so {idea} can address the gaps they point out.",
        posts.len(),
        terms
            .iter()
            .map(|t| format!("**{t}**"))
            .collect::<Vec<_>>()
            .join(", ")
    ))
}
