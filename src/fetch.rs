use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;

use crate::error::FetchError;

static DOC_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").unwrap());

pub fn extract_document_id(link: &str) -> Option<String> {
    DOC_ID_RE
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn export_url(base: &str, doc_id: &str) -> String {
    format!("{base}/document/d/{doc_id}/export?format=txt")
}

pub trait DocumentSource {
    fn fetch(&self, doc_id: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: reqwest::blocking::Client,
    base: String,
}

impl HttpDocumentSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base: base.into(),
        }
    }
}

impl DocumentSource for HttpDocumentSource {
    fn fetch(&self, doc_id: &str) -> Result<String, FetchError> {
        let url = export_url(&self.base, doc_id);
        tracing::debug!(%url, "requesting document export");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                doc_id: doc_id.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        tracing::debug!(doc_id, bytes = body.len(), "document export received");
        Ok(body)
    }
}

pub fn get_document_content(source: &dyn DocumentSource, doc_id: &str) -> Option<String> {
    match source.fetch(doc_id) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(doc_id, error = %e, "document fetch failed");
            None
        }
    }
}
