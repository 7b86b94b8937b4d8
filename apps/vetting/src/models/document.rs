use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Declared format of an uploaded resume, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Jpg,
    Jpeg,
    Png,
    Unsupported,
}

impl DocumentFormat {
    /// Maps an extension (with or without the leading dot) to a format.
    /// Matching is case-insensitive: `.PDF` and `pdf` are both `Pdf`.
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "jpg" => DocumentFormat::Jpg,
            "jpeg" => DocumentFormat::Jpeg,
            "png" => DocumentFormat::Png,
            _ => DocumentFormat::Unsupported,
        }
    }

    pub fn from_file_name(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Unsupported)
    }
}

/// A single uploaded file. Immutable once ingested; the pipeline consumes it.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let format = DocumentFormat::from_file_name(&name);
        Self {
            name,
            format,
            bytes: bytes.into(),
        }
    }
}
