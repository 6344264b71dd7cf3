use serde::Serialize;

pub const DEFAULT_CHUNK_SIZE: usize = 50;
pub const DEFAULT_TOP_WORDS: usize = 25;
pub const DEFAULT_EXPORT_BASE: &str = "https://docs.google.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisConfig {
    pub chunk_size: usize,
    pub top_words: usize,
    pub export_base: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            top_words: DEFAULT_TOP_WORDS,
            export_base: DEFAULT_EXPORT_BASE.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_top_words(mut self, top_words: usize) -> Self {
        self.top_words = top_words;
        self
    }

    pub fn with_export_base(mut self, base: impl Into<String>) -> Self {
        self.export_base = base.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_report_layout() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.chunk_size, 50);
        assert_eq!(cfg.top_words, 25);
        assert_eq!(cfg.export_base, "https://docs.google.com");
    }

    #[test]
    fn zero_chunk_size_is_raised_to_one() {
        let cfg = AnalysisConfig::default().with_chunk_size(0);
        assert_eq!(cfg.chunk_size, 1);
    }

    #[test]
    fn export_base_drops_trailing_slash() {
        let cfg = AnalysisConfig::default().with_export_base("http://127.0.0.1:9000/");
        assert_eq!(cfg.export_base, "http://127.0.0.1:9000");
    }
}
