//! Text extraction — turns an uploaded PDF, DOCX or image into lowercase text.
//!
//! `TextExtractor::extract` is total: parser errors, parser panics, OCR
//! failures and timeouts all become `ExtractedText::Failed`, whose text is
//! empty. Callers that only care about matching can use `text()` and ignore
//! the distinction.

pub mod docx;
pub mod ocr;
pub mod pdf;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::document::{Document, DocumentFormat};
use crate::models::score::ExtractionStatus;

pub use ocr::{default_tesseract_command, OcrEngine, TesseractCli};

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("DOCX parsing failed: {0}")]
    DocxParsing(String),

    #[error("Image decoding failed: {0}")]
    ImageDecoding(String),

    #[error("Could not start OCR engine at {command}: {source}")]
    OcrSpawn {
        command: PathBuf,
        source: std::io::Error,
    },

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Extractor panicked: {0}")]
    Panicked(String),

    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),
}

/// Normalized text of one document, tagged with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    Extracted(String),
    Unsupported,
    Failed(String),
}

impl ExtractedText {
    /// The lowercase text; empty unless extraction succeeded.
    pub fn text(&self) -> &str {
        match self {
            ExtractedText::Extracted(text) => text,
            ExtractedText::Unsupported | ExtractedText::Failed(_) => "",
        }
    }

    pub fn status(&self) -> ExtractionStatus {
        match self {
            ExtractedText::Extracted(_) => ExtractionStatus::Extracted,
            ExtractedText::Unsupported => ExtractionStatus::Unsupported,
            ExtractedText::Failed(reason) => ExtractionStatus::Failed(reason.clone()),
        }
    }
}

/// Format-dispatching extractor. The OCR engine is injected so the Tesseract
/// location is configuration, not process-wide state.
pub struct TextExtractor {
    ocr: Arc<dyn OcrEngine>,
    timeout: Duration,
}

impl TextExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>, timeout: Duration) -> Self {
        Self { ocr, timeout }
    }

    pub async fn extract(&self, document: &Document) -> ExtractedText {
        let result = match document.format {
            DocumentFormat::Pdf => {
                self.run_blocking(document.bytes.clone(), pdf::extract_pdf_text)
                    .await
            }
            DocumentFormat::Docx => {
                self.run_blocking(document.bytes.clone(), docx::extract_docx_text)
                    .await
            }
            DocumentFormat::Jpg | DocumentFormat::Jpeg | DocumentFormat::Png => {
                self.recognize_image(&document.bytes).await
            }
            DocumentFormat::Unsupported => {
                debug!(file = %document.name, "Unsupported extension, no text extracted");
                return ExtractedText::Unsupported;
            }
        };

        match result {
            Ok(text) => ExtractedText::Extracted(text.to_lowercase()),
            Err(e) => {
                warn!(file = %document.name, error = %e, "Text extraction failed, treating as empty");
                ExtractedText::Failed(e.to_string())
            }
        }
    }

    /// Header sniff only; OCR is the single timed step.
    async fn recognize_image(&self, bytes: &Bytes) -> Result<String, ExtractionError> {
        let format = image::guess_format(bytes)
            .map_err(|e| ExtractionError::ImageDecoding(e.to_string()))?;
        debug!(?format, "Recognized image, running OCR");

        tokio::time::timeout(self.timeout, self.ocr.recognize(bytes))
            .await
            .map_err(|_| ExtractionError::Timeout(self.timeout))?
    }

    /// Runs a CPU-bound parser off the async workers. Panics inside the
    /// parser surface as `Panicked` instead of unwinding into the runner.
    async fn run_blocking<T, F>(&self, bytes: Bytes, parse: F) -> Result<T, ExtractionError>
    where
        T: Send + 'static,
        F: FnOnce(&[u8]) -> Result<T, ExtractionError> + Send + 'static,
    {
        let handle = tokio::task::spawn_blocking(move || parse(&bytes[..]));
        match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(ExtractionError::Panicked(join_err.to_string())),
            Err(_) => Err(ExtractionError::Timeout(self.timeout)),
        }
    }
}
