use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::{DocumentSink, StorageError};

/// Writes objects as files below a root directory, creating folders on demand.
pub struct LocalDirSink {
    root: PathBuf,
}

impl LocalDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSink for LocalDirSink {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<String, StorageError> {
        let path = self.root.join(key);
        let io_err = |source: std::io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        tokio::fs::write(&path, &bytes).await.map_err(io_err)?;

        debug!(path = %path.display(), size = bytes.len(), "Stored object");
        Ok(path.display().to_string())
    }
}
