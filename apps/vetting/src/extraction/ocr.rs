use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::ExtractionError;

/// OCR engine abstraction (allows mocking for tests).
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError>;
}

/// Where Tesseract usually lives on this platform.
pub fn default_tesseract_command() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe")
    } else {
        PathBuf::from("tesseract")
    }
}

/// Runs the Tesseract command-line tool against a scratch copy of the image
/// and reads recognized text from stdout.
pub struct TesseractCli {
    command: PathBuf,
    languages: Option<String>,
}

impl TesseractCli {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            languages: None,
        }
    }

    /// Set language(s) for OCR (e.g., "ind", "ind+eng")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.languages = Some(langs.to_string());
        self
    }

    pub fn command(&self) -> &Path {
        &self.command
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let scratch = tempfile::Builder::new().prefix("vetting-ocr-").tempfile()?;
        tokio::fs::write(scratch.path(), image).await?;

        let mut cmd = Command::new(&self.command);
        cmd.arg(scratch.path())
            .arg("stdout")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(langs) = &self.languages {
            cmd.arg("-l").arg(langs);
        }

        let output = cmd.output().await.map_err(|source| ExtractionError::OcrSpawn {
            command: self.command.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::OcrProcessing(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
