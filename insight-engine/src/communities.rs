use crate::text::words;

pub const MIN_SUGGESTIONS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 5;
const MIN_IDEA_KEYWORD_LEN: usize = 5;

/// Domain keyword to the communities where that domain is discussed.
pub const COMMUNITY_TABLE: [(&str, [&str; 3]); 17] = [
    ("tech", ["technology", "gadgets", "futurology"]),
    ("software", ["software", "programming", "webdev"]),
    ("startup", ["startups", "entrepreneur", "smallbusiness"]),
    ("fitness", ["fitness", "bodyweightfitness", "running"]),
    ("health", ["health", "nutrition", "loseit"]),
    ("food", ["food", "cooking", "recipes"]),
    ("travel", ["travel", "solotravel", "digitalnomad"]),
    ("finance", ["personalfinance", "financialindependence", "investing"]),
    ("gaming", ["gaming", "pcgaming", "indiegaming"]),
    ("music", ["music", "wearethemusicmakers", "edmproduction"]),
    ("education", ["education", "learnprogramming", "teachers"]),
    ("pet", ["pets", "dogs", "cats"]),
    ("fashion", ["fashion", "malefashionadvice", "femalefashionadvice"]),
    ("parenting", ["parenting", "daddit", "mommit"]),
    ("crypto", ["cryptocurrency", "bitcoin", "ethereum"]),
    ("productivity", ["productivity", "getdisciplined", "notion"]),
    ("design", ["design", "userexperience", "graphic_design"]),
];

/// Fallback communities for ideas that match nothing specific.
pub const GENERIC_COMMUNITIES: [&str; 4] =
    ["entrepreneur", "startups", "smallbusiness", "sideproject"];

const IDEA_STOPWORDS: [&str; 16] = [
    "about", "their", "there", "these", "those", "would", "could", "should", "which", "where",
    "while", "other", "people", "things", "using", "really",
];

/// Words of the idea worth matching: longer than four characters and not a
/// filler word. Kept in order, without repeats.
pub fn idea_keywords(idea: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in words(idea) {
        if word.chars().count() >= MIN_IDEA_KEYWORD_LEN
            && !IDEA_STOPWORDS.contains(&word.as_str())
            && !keywords.contains(&word)
        {
            keywords.push(word);
        }
    }
    keywords
}

/// Between three and five community names relevant to `idea`.
pub fn suggest_communities(idea: &str) -> Vec<String> {
    let keywords = idea_keywords(idea);
    let mut suggestions: Vec<String> = Vec::new();

    for keyword in &keywords {
        let matched = COMMUNITY_TABLE
            .iter()
            .find(|(key, _)| *key == keyword.as_str());
        if let Some((_, communities)) = matched {
            push_unique(&mut suggestions, communities);
        }
    }

    // Prefix pass over every word, short ones included: "pet-sitting" yields
    // "pet", while "carpet" does not match `pet`.
    if suggestions.len() < MIN_SUGGESTIONS {
        let idea_words = words(idea);
        for (key, communities) in COMMUNITY_TABLE.iter() {
            if idea_words.iter().any(|word| word.starts_with(key)) {
                push_unique(&mut suggestions, communities);
            }
        }
    }

    if suggestions.len() < MIN_SUGGESTIONS {
        push_unique(&mut suggestions, &GENERIC_COMMUNITIES);
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn push_unique(into: &mut Vec<String>, names: &[&str]) {
    for name in names {
        if !into.iter().any(|n| n == name) {
            into.push((*name).to_string());
        }
    }
}
