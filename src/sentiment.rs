use std::collections::HashMap;

use serde::Serialize;

use crate::lexical::split_words;
use crate::provider::TextMetrics;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Chunking
// ---------------------------------------------------------------------------

/// Whitespace words grouped `chunk_size` at a time and rejoined with single
/// spaces. Only the last chunk may be shorter. A size of zero acts as one.
pub fn chunk(content: &str, chunk_size: usize) -> Vec<String> {
    let size = chunk_size.max(1);
    let words: Vec<&str> = content.split_whitespace().collect();
    words.chunks(size).map(|group| group.join(" ")).collect()
}

pub fn analyze(metrics: &dyn TextMetrics, content: &str, chunk_size: usize) -> (Vec<f64>, Vec<f64>) {
    let chunks = chunk(content, chunk_size);
    let mut polarity = Vec::with_capacity(chunks.len());
    let mut subjectivity = Vec::with_capacity(chunks.len());
    for text in &chunks {
        let s = metrics.sentiment(text);
        polarity.push(s.polarity);
        subjectivity.push(s.subjectivity);
    }
    tracing::debug!(chunks = chunks.len(), chunk_size, "scored sentiment chunks");
    (polarity, subjectivity)
}

// ---------------------------------------------------------------------------
// Lexicon model
// ---------------------------------------------------------------------------

const LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("perfect", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("like", 0.1, 0.2),
    ("enjoy", 0.4, 0.5),
    ("beautiful", 0.85, 1.0),
    ("lovely", 0.5, 0.75),
    ("pleasant", 0.733, 0.967),
    ("brilliant", 0.9, 1.0),
    ("impressive", 1.0, 1.0),
    ("interesting", 0.5, 0.5),
    ("important", 0.4, 1.0),
    ("successful", 0.75, 0.95),
    ("success", 0.3, 0.0),
    ("useful", 0.3, 0.0),
    ("helpful", 0.4, 0.5),
    ("easy", 0.433, 0.833),
    ("clear", 0.1, 0.383),
    ("strong", 0.433, 0.733),
    ("fine", 0.417, 0.5),
    ("true", 0.35, 0.65),
    ("right", 0.286, 0.536),
    ("sure", 0.5, 0.889),
    ("free", 0.4, 0.8),
    ("fresh", 0.3, 0.5),
    ("fun", 0.3, 0.2),
    ("funny", 0.25, 0.75),
    ("kind", 0.6, 0.9),
    ("safe", 0.5, 0.5),
    ("calm", 0.3, 0.75),
    ("bright", 0.7, 0.9),
    ("hopeful", 0.5, 0.7),
    ("positive", 0.227, 0.545),
    ("correct", 0.0, 0.0),
    ("new", 0.136, 0.455),
    ("old", 0.1, 0.2),
    ("small", -0.25, 0.4),
    ("bad", -0.7, 0.667),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("ugly", -0.7, 1.0),
    ("boring", -1.0, 1.0),
    ("dull", -0.3, 0.75),
    ("difficult", -0.5, 1.0),
    ("hard", -0.292, 0.542),
    ("weak", -0.375, 0.625),
    ("wrong", -0.5, 0.9),
    ("false", -0.4, 0.6),
    ("broken", -0.4, 0.4),
    ("painful", -0.7, 0.9),
    ("dangerous", -0.6, 0.9),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("annoying", -0.8, 0.9),
    ("stupid", -0.8, 1.0),
    ("useless", -0.5, 0.0),
    ("dark", -0.15, 0.4),
    ("cold", -0.6, 1.0),
    ("negative", -0.3, 0.4),
    ("failed", -0.5, 0.3),
    ("failure", -0.316, 0.3),
    ("problem", -0.2, 0.3),
    ("serious", -0.333, 0.667),
    ("strange", -0.05, 0.15),
    ("crazy", -0.6, 0.9),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("highly", 1.2),
    ("quite", 1.1),
    ("so", 1.2),
    ("too", 1.1),
    ("slightly", 0.7),
    ("somewhat", 0.8),
    ("barely", 0.5),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "n't", "without"];

const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone)]
pub struct SentimentModel {
    lexicon: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for SentimentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentModel {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word)
    }

    pub fn score(&self, text: &str) -> Sentiment {
        let words = split_words(text);
        let mut hits = 0usize;
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;

        for (i, word) in words.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = self.lexicon.get(word.as_str()) else {
                continue;
            };

            let mut lookback = i;
            if let Some(factor) = i
                .checked_sub(1)
                .and_then(|j| self.intensifiers.get(words[j].as_str()))
            {
                polarity *= factor;
                subjectivity *= factor;
                lookback -= 1;
            }
            if lookback > 0 && Self::is_negation(&words[lookback - 1]) {
                polarity *= NEGATION_FACTOR;
            }

            hits += 1;
            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
        }

        if hits == 0 {
            return Sentiment::default();
        }
        Sentiment::new(polarity_sum / hits as f64, subjectivity_sum / hits as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn chunks_hundred_twenty_words_into_three() {
        let chunks = chunk(&numbered(120), 50);
        let sizes: Vec<usize> = chunks.iter().map(|c| c.split_whitespace().count()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
    }

    #[test]
    fn chunk_normalizes_whitespace() {
        assert_eq!(chunk("a  b\n\tc d", 2), vec!["a b", "c d"]);
    }

    #[test]
    fn empty_content_has_no_chunks() {
        assert!(chunk("", 50).is_empty());
        assert!(chunk("   \n ", 50).is_empty());
    }

    #[test]
    fn zero_chunk_size_acts_as_one() {
        assert_eq!(chunk("x y z", 0), vec!["x", "y", "z"]);
    }

    #[test]
    fn positive_and_negative_words() {
        let model = SentimentModel::new();
        let good = model.score("What a good day.");
        assert!((good.polarity - 0.7).abs() < 1e-9);
        assert!((good.subjectivity - 0.6).abs() < 1e-9);
        assert!(model.score("This was a terrible idea.").polarity < 0.0);
    }

    #[test]
    fn no_sentiment_words_is_neutral() {
        let model = SentimentModel::new();
        assert_eq!(model.score("the table is made of oak"), Sentiment::default());
        assert_eq!(model.score(""), Sentiment::default());
    }

    #[test]
    fn negation_flips_and_dampens() {
        let model = SentimentModel::new();
        let s = model.score("not good");
        assert!((s.polarity + 0.35).abs() < 1e-9);
        let s = model.score("it isn't good");
        assert!((s.polarity + 0.35).abs() < 1e-9);
    }

    #[test]
    fn intensifier_scales_and_clamps() {
        let model = SentimentModel::new();
        let s = model.score("very good");
        assert!((s.polarity - 0.91).abs() < 1e-9);
        let s = model.score("extremely excellent");
        assert_eq!(s.polarity, 1.0);
        assert_eq!(s.subjectivity, 1.0);
    }

    #[test]
    fn negation_reaches_past_intensifier() {
        let model = SentimentModel::new();
        let s = model.score("not very good");
        assert!((s.polarity + 0.455).abs() < 1e-9);
    }

    #[test]
    fn mean_over_hits() {
        let model = SentimentModel::new();
        let s = model.score("good and bad");
        assert!(s.polarity.abs() < 1e-9);
    }
}
