use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::fetch::{extract_document_id, DocumentSource};
use crate::provider::TextMetrics;
use crate::{analyze_text, Report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ShowForm,
    Submit { link: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    /// The link form, with a notice when a submission produced no report.
    InputForm { notice: Option<String> },
    Results(Box<Report>),
}

impl Response {
    pub fn report(&self) -> Option<&Report> {
        match self {
            Response::Results(report) => Some(report.as_ref()),
            Response::InputForm { .. } => None,
        }
    }
}

pub struct Handler<S, M> {
    source: S,
    metrics: M,
    config: AnalysisConfig,
}

impl<S: DocumentSource, M: TextMetrics> Handler<S, M> {
    pub fn new(source: S, metrics: M, config: AnalysisConfig) -> Self {
        Self {
            source,
            metrics,
            config,
        }
    }

    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::ShowForm => Response::InputForm { notice: None },
            Request::Submit { link } => match self.submit(&link) {
                Ok(report) => {
                    tracing::info!(
                        doc_id = report.document_id.as_deref().unwrap_or_default(),
                        words = report.word_count,
                        chunks = report.chunk_count,
                        "report ready"
                    );
                    Response::Results(Box::new(report))
                }
                Err(e) => {
                    tracing::info!(error = %e, "submission produced no report");
                    Response::InputForm {
                        notice: Some(e.notice()),
                    }
                }
            },
        }
    }

    pub fn submit(&self, link: &str) -> Result<Report> {
        let doc_id = extract_document_id(link).ok_or(AnalysisError::InvalidLink)?;
        let content = self.source.fetch(&doc_id)?;
        let mut report = analyze_text(&self.metrics, &content, &self.config)?;
        report.document_id = Some(doc_id);
        Ok(report)
    }
}
