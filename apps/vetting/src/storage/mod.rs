//! Output sinks for routed resumes and the exported workbook.

pub mod local;
pub mod s3;

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use local::LocalDirSink;
pub use s3::S3Sink;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error writing {key}: {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },

    #[error("S3 error writing {key}: {message}")]
    S3 { key: String, message: String },

    #[error("Invalid object name: {0:?}")]
    InvalidName(String),
}

/// Append-only destination for a run's output.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Stores `bytes` under `key` and returns a human-readable location.
    async fn put(&self, key: &str, bytes: Bytes) -> Result<String, StorageError>;
}

/// Reduces an uploaded file name to its final path component so a name like
/// `../../etc/passwd` cannot escape the output location.
pub fn safe_file_name(name: &str) -> Result<&str, StorageError> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| StorageError::InvalidName(name.to_string()))
}

/// `<prefix>/<bucket>/<file name>`
pub fn object_key(prefix: &str, bucket: &str, file_name: &str) -> Result<String, StorageError> {
    Ok(format!("{prefix}/{bucket}/{}", safe_file_name(file_name)?))
}

/// `cv.pdf`, 2 -> `cv (2).pdf`. Used when a name repeats within one run.
pub fn numbered_file_name(file_name: &str, n: usize) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem} ({n}).{ext}"),
        None => format!("{stem} ({n})"),
    }
}
