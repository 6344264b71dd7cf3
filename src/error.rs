use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("document {doc_id} export returned HTTP {status}")]
    Status { doc_id: String, status: u16 },

    #[error("document export request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no words left to chart after filtering")]
    EmptyFrequencies,

    #[error("polarity has {polarity} samples but subjectivity has {subjectivity}")]
    LengthMismatch { polarity: usize, subjectivity: usize },

    #[error("embedded label font could not be parsed")]
    Font,

    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no document id found in link")]
    InvalidLink,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl AnalysisError {
    pub fn notice(&self) -> String {
        match self {
            AnalysisError::InvalidLink => {
                "That link has no document id. Paste a link of the form .../document/d/<id>/...".to_string()
            }
            AnalysisError::Fetch(FetchError::Status { status, .. }) => format!(
                "The document could not be downloaded (HTTP {status}). Make sure it is shared with anyone who has the link."
            ),
            AnalysisError::Fetch(FetchError::Transport(_)) => {
                "The document service could not be reached. Try again later.".to_string()
            }
            AnalysisError::Chart(ChartError::EmptyFrequencies) => {
                "The document has no words left to analyze after filtering common words.".to_string()
            }
            AnalysisError::Chart(_) => "The charts for this document could not be drawn.".to_string(),
        }
    }
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
