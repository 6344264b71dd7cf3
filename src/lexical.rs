use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::provider::TextMetrics;
use crate::tagger::PosTag;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LexicalProfile {
    pub words: Vec<String>,
    pub tags: Vec<(String, PosTag)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

// ---------------------------------------------------------------------------
// Filler words
// ---------------------------------------------------------------------------

pub const STOPLIST: &[&str] = &[
    "in", "the", "and", "of", "to", "a", "is", "that", "it", "on", "for", "with", "as", "was",
    "at", "by", "an", "be", "this", "which", "or", "from", "but", "not", "are", "have", "had",
    "has", "were", "they", "their", "you", "we", "he", "she", "his", "her", "them", "us", "our",
    "my", "me", "i",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPLIST.iter().copied().collect());

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

static LEADING_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w]+").unwrap());
static TRAILING_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w]+$").unwrap());
static CLITIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)('s|'re|'ve|'ll|'d|'m)$").unwrap());

pub fn split_words(content: &str) -> Vec<String> {
    let lowered = content.to_lowercase();
    let mut tokens = Vec::new();

    for piece in lowered.split_whitespace() {
        let mut rest = piece;

        if let Some(m) = LEADING_PUNCT_RE.find(rest) {
            push_punct_run(&mut tokens, m.as_str());
            rest = &rest[m.end()..];
        }
        if rest.is_empty() {
            continue;
        }

        let mut trailing = "";
        if let Some(m) = TRAILING_PUNCT_RE.find(rest) {
            trailing = m.as_str();
            rest = &rest[..m.start()];
        }

        push_core(&mut tokens, rest);
        push_punct_run(&mut tokens, trailing);
    }

    tokens.retain(|t| !is_punctuation_token(t));
    tokens
}

fn push_core(tokens: &mut Vec<String>, core: &str) {
    if core.is_empty() {
        return;
    }
    let core = core.replace('\u{2019}', "'");
    if core.len() > 3 && core.ends_with("n't") {
        tokens.push(core[..core.len() - 3].to_string());
        tokens.push("n't".to_string());
    } else if let Some(caps) = CLITIC_RE.captures(&core) {
        tokens.push(caps[1].to_string());
        tokens.push(caps[2].to_string());
    } else {
        tokens.push(core);
    }
}

fn push_punct_run(tokens: &mut Vec<String>, run: &str) {
    let mut chars = run.chars().peekable();
    while let Some(c) = chars.next() {
        let mut token = c.to_string();
        if c == '.' || c == '-' {
            while chars.peek() == Some(&c) {
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }
}

fn is_punctuation_token(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            c.is_ascii_punctuation()
                || matches!(
                    c,
                    '\u{201C}'
                        | '\u{201D}'
                        | '\u{2018}'
                        | '\u{2019}'
                        | '\u{2013}'
                        | '\u{2014}'
                        | '\u{2026}'
                        | '\u{00AB}'
                        | '\u{00BB}'
                )
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn tokenize(metrics: &dyn TextMetrics, content: &str) -> LexicalProfile {
    let words = metrics.tokenize(content);
    let tags = metrics.tag(&words);
    debug_assert_eq!(words.len(), tags.len());
    LexicalProfile { words, tags }
}

/// Top `top_n` non-filler words by descending count, ties in first-seen order.
pub fn word_frequencies(metrics: &dyn TextMetrics, content: &str, top_n: usize) -> Vec<WordCount> {
    most_common(&metrics.tokenize(content), top_n)
}

pub fn most_common(words: &[String], top_n: usize) -> Vec<WordCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for word in words.iter().filter(|w| !is_stopword(w)) {
        match index.get(word.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(word.as_str(), counts.len());
                counts.push(WordCount::new(word.as_str(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

pub fn tag_counts(tags: &[(String, PosTag)]) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    for (_, tag) in tags {
        *out.entry(tag.as_str().to_string()).or_insert(0) += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        split_words(text)
    }

    #[test]
    fn lowercases_and_drops_punctuation() {
        assert_eq!(words("Hello, World!"), ["hello", "world"]);
    }

    #[test]
    fn splits_contractions() {
        assert_eq!(words("I can't go"), ["i", "ca", "n't", "go"]);
        assert_eq!(words("She's here"), ["she", "'s", "here"]);
        assert_eq!(words("They\u{2019}re late"), ["they", "'re", "late"]);
    }

    #[test]
    fn keeps_ellipsis_and_inner_punctuation() {
        assert_eq!(words("wait... well-known e.g."), ["wait", "...", "well-known", "e.g"]);
    }

    #[test]
    fn quotes_and_brackets_are_removed() {
        assert_eq!(words("\"(quoted)\" \u{201C}curly\u{201D}"), ["quoted", "curly"]);
    }

    #[test]
    fn punctuation_only_input_is_empty() {
        assert!(words(" , . ! ? ").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn stoplist_has_the_filler_words() {
        assert_eq!(STOPLIST.len(), 43);
        assert!(is_stopword("the"));
        assert!(is_stopword("i"));
        assert!(!is_stopword("cat"));
    }

    #[test]
    fn most_common_orders_by_count_then_first_seen() {
        let input = words("the cat sat on the mat the cat ran");
        let table = most_common(&input, 25);
        assert_eq!(
            table,
            vec![
                WordCount::new("cat", 2),
                WordCount::new("sat", 1),
                WordCount::new("mat", 1),
                WordCount::new("ran", 1),
            ]
        );
    }

    #[test]
    fn most_common_truncates() {
        let input = words("a b c d e f b c c");
        let table = most_common(&input, 2);
        assert_eq!(table, vec![WordCount::new("c", 3), WordCount::new("b", 2)]);
    }

    #[test]
    fn only_filler_words_gives_empty_table() {
        assert!(most_common(&words("the and of to"), 25).is_empty());
    }

    #[test]
    fn word_frequencies_skip_punctuation_and_filler() {
        let table = word_frequencies(crate::provider::shared(), "Rain, rain. The rain fell!", 25);
        assert_eq!(table, vec![WordCount::new("rain", 3), WordCount::new("fell", 1)]);
    }

    #[test]
    fn tag_counts_tally_each_tag() {
        let tags = vec![
            ("the".to_string(), PosTag::DT),
            ("cat".to_string(), PosTag::NN),
            ("a".to_string(), PosTag::DT),
        ];
        let counts = tag_counts(&tags);
        assert_eq!(counts.get("DT"), Some(&2));
        assert_eq!(counts.get("NN"), Some(&1));
    }
}
