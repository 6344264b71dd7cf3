pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod lexical;
pub mod provider;
pub mod readability;
pub mod sentiment;
pub mod tagger;

use std::collections::BTreeMap;

use serde::Serialize;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, ChartError, FetchError};
pub use fetch::{extract_document_id, DocumentSource, HttpDocumentSource};
pub use handler::{Handler, Request, Response};
pub use lexical::WordCount;
pub use provider::{BuiltinMetrics, TextMetrics};
pub use readability::ReadabilityScores;
pub use sentiment::Sentiment;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub full_text: String,
    pub word_count: usize,
    pub frequencies: Vec<WordCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_chart: Option<String>,
    pub readability: ReadabilityScores,
    pub tag_counts: BTreeMap<String, usize>,
    pub chunk_count: usize,
    pub polarity: Vec<f64>,
    pub subjectivity: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_chart: Option<String>,
}

impl Report {
    pub fn without_images(mut self) -> Self {
        self.frequency_chart = None;
        self.sentiment_chart = None;
        self
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_text(
    metrics: &dyn TextMetrics,
    content: &str,
    config: &AnalysisConfig,
) -> Result<Report, ChartError> {
    let word_count = content.split_whitespace().count();

    // 1. Words and tags
    let profile = lexical::tokenize(metrics, content);
    let tag_counts = lexical::tag_counts(&profile.tags);
    let frequencies = lexical::most_common(&profile.words, config.top_words);
    tracing::debug!(
        tokens = profile.words.len(),
        distinct = frequencies.len(),
        "lexical pass done"
    );

    // 2. Frequency chart
    let frequency_chart = chart::render_frequency_chart(&frequencies, config.top_words)?;

    // 3. Readability
    let readability = metrics.readability(content);

    // 4. Sentiment per chunk
    let (polarity, subjectivity) = sentiment::analyze(metrics, content, config.chunk_size);
    let sentiment_chart = chart::render_sentiment_chart(&polarity, &subjectivity)?;

    Ok(Report {
        document_id: None,
        full_text: content.to_string(),
        word_count,
        frequencies,
        frequency_chart: Some(frequency_chart),
        readability,
        tag_counts,
        chunk_count: polarity.len(),
        polarity,
        subjectivity,
        sentiment_chart: Some(sentiment_chart),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_line_up() {
        let text = "The cat sat on the mat. The cat was very happy and the day was good.";
        let report = analyze_text(provider::shared(), text, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.word_count, 16);
        assert_eq!(report.chunk_count, 1);
        assert_eq!(report.polarity.len(), report.subjectivity.len());
        assert_eq!(report.frequencies[0], WordCount::new("cat", 2));
        assert_eq!(report.tag_counts.values().sum::<usize>(), 16);
        assert!(report.frequency_chart.is_some());
        assert!(report.sentiment_chart.is_some());
    }

    #[test]
    fn filler_only_text_cannot_be_charted() {
        let err = analyze_text(provider::shared(), "the and of to", &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyFrequencies));
    }

    #[test]
    fn unbroken_run_of_letters_still_reports() {
        let text = format!("intro {} outro", "x".repeat(12_000));
        let report = analyze_text(provider::shared(), &text, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.word_count, 3);
        assert!(report.frequency_chart.is_some());
    }

    #[test]
    fn without_images_keeps_numbers() {
        let report = analyze_text(provider::shared(), "bright fresh morning air", &AnalysisConfig::default())
            .unwrap()
            .without_images();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("frequency_chart").is_none());
        assert!(json.get("sentiment_chart").is_none());
        assert!(json.get("readability").is_some());
        assert_eq!(json["chunk_count"], 1);
    }
}
