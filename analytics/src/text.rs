use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// A hashtag with its raw occurrence count across the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagCount {
    pub tag: String,
    pub count: usize,
}

/// A word with its occurrence count, for word-cloud sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

fn hashtag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"))
}

/// Extract `#word` tokens from titles, case-sensitively, and count raw
/// occurrences across all titles. Returns the top `n` by count; ties keep
/// first-seen order.
pub fn extract_hashtags<'a>(
    titles: impl IntoIterator<Item = &'a str>,
    n: usize,
) -> Vec<HashtagCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    // first-seen order for the documented tie-break
    let mut order: Vec<String> = Vec::new();

    for title in titles {
        for m in hashtag_regex().find_iter(title) {
            let tag = m.as_str().to_string();
            match counts.get_mut(&tag) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(tag.clone(), 1);
                    order.push(tag);
                }
            }
        }
    }

    let mut result: Vec<HashtagCount> = order
        .into_iter()
        .map(|tag| {
            let count = counts[&tag];
            HashtagCount { tag, count }
        })
        .collect();
    // stable sort keeps first-seen order among equal counts
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result.truncate(n);
    result
}

/// Common words excluded from word clouds.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "was", "with", "this", "that", "have",
    "has", "from", "its", "can", "will", "what", "when", "how", "why", "who", "your", "about",
    "just", "out", "get", "too", "they", "them", "their", "than", "then", "now", "after", "into",
    "over", "more", "some", "any",
];

/// Word-occurrence counts over a corpus of titles, lowercased, stop-words
/// and short tokens removed. Returns the top `n` by count, ties by
/// first-seen order.
pub fn word_frequencies<'a>(titles: impl IntoIterator<Item = &'a str>, n: usize) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for title in titles {
        for token in title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= 3)
        {
            let word = token.to_lowercase();
            if STOPWORDS.contains(&word.as_str()) {
                continue;
            }
            match counts.get_mut(&word) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(word.clone(), 1);
                    order.push(word);
                }
            }
        }
    }

    let mut result: Vec<WordCount> = order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            WordCount { word, count }
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result.truncate(n);
    result
}
