use once_cell::sync::OnceCell;

use crate::lexical::split_words;
use crate::readability::{ReadabilityEngine, ReadabilityScores};
use crate::sentiment::{Sentiment, SentimentModel};
use crate::tagger::{PosTag, Tagger};

pub trait TextMetrics {
    fn tokenize(&self, content: &str) -> Vec<String>;
    fn tag(&self, words: &[String]) -> Vec<(String, PosTag)>;
    fn readability(&self, content: &str) -> ReadabilityScores;
    fn sentiment(&self, content: &str) -> Sentiment;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn tokenize(&self, content: &str) -> Vec<String> {
        (**self).tokenize(content)
    }

    fn tag(&self, words: &[String]) -> Vec<(String, PosTag)> {
        (**self).tag(words)
    }

    fn readability(&self, content: &str) -> ReadabilityScores {
        (**self).readability(content)
    }

    fn sentiment(&self, content: &str) -> Sentiment {
        (**self).sentiment(content)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuiltinMetrics {
    tagger: Tagger,
    readability: ReadabilityEngine,
    sentiment: SentimentModel,
}

impl BuiltinMetrics {
    pub fn new() -> Self {
        Self {
            tagger: Tagger::new(),
            readability: ReadabilityEngine::new(),
            sentiment: SentimentModel::new(),
        }
    }
}

impl TextMetrics for BuiltinMetrics {
    fn tokenize(&self, content: &str) -> Vec<String> {
        split_words(content)
    }

    fn tag(&self, words: &[String]) -> Vec<(String, PosTag)> {
        self.tagger.tag(words)
    }

    fn readability(&self, content: &str) -> ReadabilityScores {
        self.readability.score(content)
    }

    fn sentiment(&self, content: &str) -> Sentiment {
        self.sentiment.score(content)
    }
}

static SHARED: OnceCell<BuiltinMetrics> = OnceCell::new();

pub fn init() -> &'static BuiltinMetrics {
    SHARED.get_or_init(|| {
        tracing::info!("initializing built-in text metrics");
        BuiltinMetrics::new()
    })
}

pub fn shared() -> &'static BuiltinMetrics {
    init()
}
