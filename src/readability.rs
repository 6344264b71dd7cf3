use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const METRIC_NAMES: [&str; 10] = [
    "Flesch Reading Ease",
    "SMOG Index",
    "Flesch-Kincaid Grade Level",
    "Coleman-Liau Index",
    "Automated Readability Index",
    "Dale-Chall Readability Score",
    "Difficult Words",
    "Linsear Write Formula",
    "Gunning Fog",
    "Text Standard",
];

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityScores {
    #[serde(rename = "Flesch Reading Ease")]
    pub flesch_reading_ease: f64,
    #[serde(rename = "SMOG Index")]
    pub smog_index: f64,
    #[serde(rename = "Flesch-Kincaid Grade Level")]
    pub flesch_kincaid_grade: f64,
    #[serde(rename = "Coleman-Liau Index")]
    pub coleman_liau_index: f64,
    #[serde(rename = "Automated Readability Index")]
    pub automated_readability_index: f64,
    #[serde(rename = "Dale-Chall Readability Score")]
    pub dale_chall_score: f64,
    #[serde(rename = "Difficult Words")]
    pub difficult_words: usize,
    #[serde(rename = "Linsear Write Formula")]
    pub linsear_write: f64,
    #[serde(rename = "Gunning Fog")]
    pub gunning_fog: f64,
    #[serde(rename = "Text Standard")]
    pub text_standard: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Count(usize),
    Label(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(v) => write!(f, "{v}"),
            MetricValue::Count(v) => write!(f, "{v}"),
            MetricValue::Label(v) => f.write_str(v),
        }
    }
}

impl ReadabilityScores {
    pub fn entries(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            (METRIC_NAMES[0], MetricValue::Number(self.flesch_reading_ease)),
            (METRIC_NAMES[1], MetricValue::Number(self.smog_index)),
            (METRIC_NAMES[2], MetricValue::Number(self.flesch_kincaid_grade)),
            (METRIC_NAMES[3], MetricValue::Number(self.coleman_liau_index)),
            (METRIC_NAMES[4], MetricValue::Number(self.automated_readability_index)),
            (METRIC_NAMES[5], MetricValue::Number(self.dale_chall_score)),
            (METRIC_NAMES[6], MetricValue::Count(self.difficult_words)),
            (METRIC_NAMES[7], MetricValue::Number(self.linsear_write)),
            (METRIC_NAMES[8], MetricValue::Number(self.gunning_fog)),
            (METRIC_NAMES[9], MetricValue::Label(self.text_standard.clone())),
        ]
    }
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[^.!?]+[.!?]*").unwrap());
static DIFFICULT_CANDIDATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w'\u{2018}\u{2019}]+").unwrap());

const EASY_WORDS: &str = include_str!("../assets/easy_words.txt");

// ---------------------------------------------------------------------------
// Text statistics
// ---------------------------------------------------------------------------

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect()
}

fn lexicon_count(text: &str) -> usize {
    strip_punctuation(text).split_whitespace().count()
}

fn sentence_count(text: &str) -> usize {
    let mut kept = 0usize;
    for m in SENTENCE_RE.find_iter(text) {
        if lexicon_count(m.as_str()) > 2 {
            kept += 1;
        }
    }
    kept.max(1)
}

pub fn syllable_count(word: &str) -> usize {
    let w: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if w.is_empty() {
        return 0;
    }
    if w.len() <= 3 {
        return 1;
    }

    let is_vowel = |i: usize| -> bool {
        match w[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => true,
            'y' => i > 0,
            _ => false,
        }
    };

    let mut count = 0usize;
    let mut prev_vowel = false;
    for i in 0..w.len() {
        let v = is_vowel(i);
        if v && !prev_vowel {
            count += 1;
        }
        prev_vowel = v;
    }

    let n = w.len();
    let last = w[n - 1];
    let before = w[n - 2];
    if count > 1 {
        if last == 'e' && !(before == 'l' && !is_vowel(n - 3)) {
            count -= 1;
        } else if last == 'd' && before == 'e' && !matches!(w[n - 3], 't' | 'd') {
            count -= 1;
        } else if last == 's'
            && before == 'e'
            && !matches!(w[n - 3], 's' | 'x' | 'z' | 'c' | 'g')
            && !(w[n - 3] == 'h' && matches!(w.get(n.wrapping_sub(4)), Some('c' | 's')))
        {
            count -= 1;
        }
    }
    count.max(1)
}

fn div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let p = 10f64.powi(places);
    (value * p).round() / p
}

#[derive(Debug, Clone)]
struct TextStatistics {
    words: usize,
    sentences: usize,
    syllables: usize,
    polysyllables: usize,
    letters: usize,
    chars: usize,
}

impl TextStatistics {
    fn collect(text: &str) -> Self {
        let stripped = strip_punctuation(text);
        let mut words = 0usize;
        let mut syllables = 0usize;
        let mut polysyllables = 0usize;
        let mut letters = 0usize;
        for word in stripped.split_whitespace() {
            let s = syllable_count(word);
            words += 1;
            syllables += s;
            if s >= 3 {
                polysyllables += 1;
            }
            letters += word.chars().count();
        }
        Self {
            words,
            sentences: sentence_count(text),
            syllables,
            polysyllables,
            letters,
            chars: text.chars().filter(|c| !c.is_whitespace()).count(),
        }
    }

    fn avg_sentence_length(&self) -> f64 {
        div(self.words as f64, self.sentences as f64)
    }

    fn avg_syllables_per_word(&self) -> f64 {
        div(self.syllables as f64, self.words as f64)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReadabilityEngine {
    easy_words: HashSet<&'static str>,
}

impl Default for ReadabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadabilityEngine {
    pub fn new() -> Self {
        Self {
            easy_words: EASY_WORDS.split_whitespace().collect(),
        }
    }

    pub fn is_easy_word(&self, word: &str) -> bool {
        self.easy_words.contains(word)
    }

    pub fn score(&self, text: &str) -> ReadabilityScores {
        let stats = TextStatistics::collect(text);

        let flesch_reading_ease = self.flesch_reading_ease(&stats);
        let flesch_kincaid_grade = self.flesch_kincaid_grade(&stats);
        let smog_index = self.smog_index(&stats);
        let coleman_liau_index = self.coleman_liau_index(&stats);
        let automated_readability_index = self.automated_readability_index(&stats);
        let dale_chall_score = self.dale_chall_score(text, &stats);
        let difficult_words = self.difficult_words(text, 2);
        let linsear_write = self.linsear_write(text);
        let gunning_fog = self.gunning_fog(text, &stats);

        let grades = [
            flesch_kincaid_grade,
            smog_index,
            coleman_liau_index,
            automated_readability_index,
            dale_chall_score,
            linsear_write,
            gunning_fog,
        ];
        let text_standard = text_standard(flesch_reading_ease, &grades);

        tracing::debug!(
            words = stats.words,
            sentences = stats.sentences,
            syllables = stats.syllables,
            "readability statistics"
        );

        ReadabilityScores {
            flesch_reading_ease,
            smog_index,
            flesch_kincaid_grade,
            coleman_liau_index,
            automated_readability_index,
            dale_chall_score,
            difficult_words,
            linsear_write,
            gunning_fog,
            text_standard,
        }
    }

    fn flesch_reading_ease(&self, s: &TextStatistics) -> f64 {
        let asl = s.avg_sentence_length();
        let asw = s.avg_syllables_per_word();
        round_to(206.835 - 1.015 * asl - 84.6 * asw, 2)
    }

    fn flesch_kincaid_grade(&self, s: &TextStatistics) -> f64 {
        let asl = s.avg_sentence_length();
        let asw = s.avg_syllables_per_word();
        round_to(0.39 * asl + 11.8 * asw - 15.59, 1)
    }

    fn smog_index(&self, s: &TextStatistics) -> f64 {
        if s.sentences < 3 {
            return 0.0;
        }
        let poly = s.polysyllables as f64 * 30.0 / s.sentences as f64;
        round_to(1.043 * poly.sqrt() + 3.1291, 1)
    }

    fn coleman_liau_index(&self, s: &TextStatistics) -> f64 {
        if s.words == 0 {
            return 0.0;
        }
        let letters = round_to(div(s.letters as f64, s.words as f64) * 100.0, 2);
        let sentences = round_to(div(s.sentences as f64, s.words as f64) * 100.0, 2);
        round_to(0.058 * letters - 0.296 * sentences - 15.8, 2)
    }

    fn automated_readability_index(&self, s: &TextStatistics) -> f64 {
        if s.words == 0 {
            return 0.0;
        }
        let a = div(s.chars as f64, s.words as f64);
        let b = div(s.words as f64, s.sentences as f64);
        round_to(4.71 * a + 0.5 * b - 21.43, 1)
    }

    fn dale_chall_score(&self, text: &str, s: &TextStatistics) -> f64 {
        if s.words == 0 {
            return 0.0;
        }
        let familiar = s.words.saturating_sub(self.difficult_words(text, 0));
        let difficult_pct = 100.0 - div(familiar as f64, s.words as f64) * 100.0;
        let mut score = 0.1579 * difficult_pct + 0.0496 * s.avg_sentence_length();
        if difficult_pct > 5.0 {
            score += 3.6365;
        }
        round_to(score, 2)
    }

    pub fn difficult_words(&self, text: &str, syllable_threshold: usize) -> usize {
        let lowered = text.to_lowercase();
        let mut seen: HashSet<&str> = HashSet::new();
        for m in DIFFICULT_CANDIDATE_RE.find_iter(&lowered) {
            let word = m.as_str();
            if self.is_easy_word(word) {
                continue;
            }
            if syllable_count(word) < syllable_threshold {
                continue;
            }
            seen.insert(word);
        }
        seen.len()
    }

    fn linsear_write(&self, text: &str) -> f64 {
        let sample: Vec<&str> = text.split_whitespace().take(100).collect();
        let (mut easy, mut hard) = (0usize, 0usize);
        for word in &sample {
            if syllable_count(word) < 3 {
                easy += 1;
            } else {
                hard += 1;
            }
        }
        let joined = sample.join(" ");
        let mut number = (easy + hard * 3) as f64 / sentence_count(&joined) as f64;
        if number <= 20.0 {
            number -= 2.0;
        }
        round_to(number / 2.0, 2)
    }

    fn gunning_fog(&self, text: &str, s: &TextStatistics) -> f64 {
        if s.words == 0 {
            return 0.0;
        }
        let pct_difficult = div(self.difficult_words(text, 3) as f64, s.words as f64) * 100.0;
        round_to(0.4 * (s.avg_sentence_length() + pct_difficult), 2)
    }
}

// ---------------------------------------------------------------------------
// Consensus grade
// ---------------------------------------------------------------------------

fn flesch_grade(score: f64) -> Vec<i64> {
    if (90.0..100.0).contains(&score) {
        vec![5]
    } else if (80.0..90.0).contains(&score) {
        vec![6]
    } else if (70.0..80.0).contains(&score) {
        vec![7]
    } else if (60.0..70.0).contains(&score) {
        vec![8, 9]
    } else if (50.0..60.0).contains(&score) {
        vec![10]
    } else if (40.0..50.0).contains(&score) {
        vec![11]
    } else if (30.0..40.0).contains(&score) {
        vec![12]
    } else {
        vec![13]
    }
}

pub fn grade_suffix(grade: i64) -> &'static str {
    let teens = grade.rem_euclid(100);
    if (10..=20).contains(&teens) {
        return "th";
    }
    match grade.rem_euclid(10) {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Most frequent grade across all metrics, first seen wins ties.
fn text_standard(flesch: f64, grades: &[f64]) -> String {
    let mut votes: Vec<i64> = Vec::new();
    votes.push(grades[0].round() as i64);
    votes.push(grades[0].ceil() as i64);
    votes.extend(flesch_grade(flesch));
    for g in &grades[1..] {
        votes.push(g.round() as i64);
        votes.push(g.ceil() as i64);
    }

    let mut tally: HashMap<i64, usize> = HashMap::new();
    for v in &votes {
        *tally.entry(*v).or_insert(0) += 1;
    }
    let best = tally.values().copied().max().unwrap_or(0);
    let grade = votes
        .iter()
        .copied()
        .find(|v| tally.get(v) == Some(&best))
        .unwrap_or(0);

    let lower = grade - 1;
    let upper = grade;
    format!(
        "{lower}{} and {upper}{} grade",
        grade_suffix(lower),
        grade_suffix(upper)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "The cat sat on the mat. The dog ran to the park. \
                          We like to play in the sun. It is a good day.";
    const DENSE: &str = "Institutional accountability necessitates comprehensive \
                         organizational restructuring. Administrative \
                         inefficiencies systematically undermine operational \
                         effectiveness. Consequently, interdepartmental \
                         communication requires substantial reconsideration.";

    #[test]
    fn syllable_estimates() {
        assert_eq!(syllable_count("cat"), 1);
        assert_eq!(syllable_count("table"), 2);
        assert_eq!(syllable_count("make"), 1);
        assert_eq!(syllable_count("jumped"), 1);
        assert_eq!(syllable_count("wanted"), 2);
        assert_eq!(syllable_count("boxes"), 2);
        assert_eq!(syllable_count("beautiful"), 3);
        assert_eq!(syllable_count(""), 0);
    }

    #[test]
    fn short_fragments_do_not_count_as_sentences() {
        assert_eq!(sentence_count("Hi. Ok. This one counts fully."), 1);
        assert_eq!(sentence_count("One two three. Four five six."), 2);
        assert_eq!(sentence_count(""), 1);
    }

    #[test]
    fn simple_text_reads_easier_than_dense_text() {
        let engine = ReadabilityEngine::new();
        let simple = engine.score(SIMPLE);
        let dense = engine.score(DENSE);
        assert!(simple.flesch_reading_ease > dense.flesch_reading_ease);
        assert!(simple.flesch_kincaid_grade < dense.flesch_kincaid_grade);
        assert!(simple.gunning_fog < dense.gunning_fog);
        assert!(simple.difficult_words < dense.difficult_words);
    }

    #[test]
    fn familiar_words_are_not_difficult() {
        let engine = ReadabilityEngine::new();
        assert_eq!(engine.difficult_words("the happy family had breakfast together", 2), 0);
        assert_eq!(engine.difficult_words("institutional institutional", 2), 1);
    }

    #[test]
    fn everyday_vocabulary_is_familiar() {
        let engine = ReadabilityEngine::new();
        for word in ["visitor", "river", "farmer", "garden", "valley", "pocketbook", "yesterday"] {
            assert!(engine.is_easy_word(word), "{word} should be familiar");
        }
        assert!(EASY_WORDS.split_whitespace().count() > 2900);

        let text = "The visitor picked roses and plants in the garden. \
                    The farmer planted seeds near the river.";
        // Only the inflected "roses" and "planted" fall outside the list.
        assert_eq!(engine.difficult_words(text, 2), 2);
    }

    #[test]
    fn empty_text_degenerates_without_panicking() {
        let scores = ReadabilityEngine::new().score("");
        assert_eq!(scores.difficult_words, 0);
        assert_eq!(scores.smog_index, 0.0);
        assert_eq!(scores.coleman_liau_index, 0.0);
        assert_eq!(scores.gunning_fog, 0.0);
        assert!(scores.text_standard.ends_with("grade"));
    }

    #[test]
    fn smog_needs_three_sentences() {
        let engine = ReadabilityEngine::new();
        assert_eq!(engine.score("Only one sentence is here.").smog_index, 0.0);
        assert!(engine.score(DENSE).smog_index > 0.0);
    }

    #[test]
    fn grade_suffixes() {
        assert_eq!(grade_suffix(1), "st");
        assert_eq!(grade_suffix(2), "nd");
        assert_eq!(grade_suffix(3), "rd");
        assert_eq!(grade_suffix(4), "th");
        assert_eq!(grade_suffix(11), "th");
        assert_eq!(grade_suffix(12), "th");
        assert_eq!(grade_suffix(21), "st");
        assert_eq!(grade_suffix(-1), "th");
    }

    #[test]
    fn text_standard_picks_majority_grade() {
        let label = text_standard(65.0, &[8.2, 8.4, 7.9, 8.1, 8.0, 9.3, 8.6]);
        assert_eq!(label, "7th and 8th grade");
    }

    #[test]
    fn entries_follow_metric_names() {
        let scores = ReadabilityEngine::new().score(SIMPLE);
        let names: Vec<&str> = scores.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, METRIC_NAMES);
    }

    #[test]
    fn serializes_exactly_ten_named_keys() {
        let scores = ReadabilityEngine::new().score(SIMPLE);
        let value = serde_json::to_value(&scores).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 10);
        for name in METRIC_NAMES {
            assert!(obj.contains_key(name), "missing {name}");
        }
        assert!(obj["Text Standard"].is_string());
        assert!(obj["Difficult Words"].is_u64());
    }
}
