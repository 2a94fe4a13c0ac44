use once_cell::sync::Lazy;
use regex::Regex;

/// A run of ASCII word characters; the same notion of "word" a `\b` boundary
/// uses, so whole-token equality is whole-word matching.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word pattern is valid"));

/// Stopwords dropped from title keyword frequency.
pub const KEYWORD_STOPWORDS: [&str; 18] = [
    "this", "that", "what", "with", "from", "have", "about", "your", "just", "they", "them",
    "their", "there", "these", "those", "were", "will", "when",
];

/// Stopwords dropped from the word cloud.
pub const CLOUD_STOPWORDS: [&str; 38] = [
    "a", "an", "the", "and", "or", "but", "is", "are", "was", "were", "be", "have", "has", "had",
    "do", "does", "did", "to", "from", "in", "out", "on", "off", "over", "under", "of", "for",
    "with", "by", "at", "this", "that", "these", "those", "it", "its", "they", "them",
];

/// Case-folded word tokens of `text`, in order of appearance.
pub fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
