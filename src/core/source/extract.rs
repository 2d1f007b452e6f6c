//! Raw text extraction from local paper files.
//!
//! PDFs go through the external `pdftotext` tool (poppler-utils);
//! `.txt` and `.md` files are read directly. Any failure is logged
//! and yields an empty string, which the processing pipeline treats
//! as "skip this paper".

use super::TextExtractor;
use crate::core::error::{PaperRagError, Result};
use crate::core::types::Document;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

const DEFAULT_PDFTOTEXT: &str = "pdftotext";

/// Extracts text by file extension
#[derive(Debug, Clone)]
pub struct FileTextExtractor {
    pdftotext: String,
}

impl Default for FileTextExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PDFTOTEXT)
    }
}

impl FileTextExtractor {
    /// Use `pdftotext` as the name or path of the PDF converter
    pub fn new(pdftotext: impl Into<String>) -> Self {
        Self {
            pdftotext: pdftotext.into(),
        }
    }

    fn is_plain_text(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
            Some("txt") | Some("md")
        )
    }

    async fn read_plain(path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PaperRagError::ExtractionFailed(format!("cannot read {path:?}: {e}")))
    }

    async fn read_pdf(&self, path: &Path) -> Result<String> {
        // "-" writes to stdout; pages are separated by form feeds
        let out = Command::new(&self.pdftotext)
            .arg("-enc")
            .arg("UTF-8")
            .arg(path)
            .arg("-")
            .output()
            .await
            .map_err(|e| {
                PaperRagError::ExtractionFailed(format!("cannot run {}: {e}", self.pdftotext))
            })?;

        if !out.status.success() {
            return Err(PaperRagError::ExtractionFailed(format!(
                "{} exited with {} on {:?}: {}",
                self.pdftotext,
                out.status,
                path,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&out.stdout).replace('\u{c}', "\n"))
    }

    /// Extract text, reporting why it failed
    pub async fn try_extract(&self, document: &Document) -> Result<String> {
        let path = document.pdf_path.as_path();
        if Self::is_plain_text(path) {
            Self::read_plain(path).await
        } else {
            self.read_pdf(path).await
        }
    }
}

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract(&self, document: &Document) -> String {
        match self.try_extract(document).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Error extracting text from {}: {}", document.arxiv_id, e);
                String::new()
            }
        }
    }
}
