//! Image blob storage behind `POST /upload`.
//!
//! Stored files are addressed by an opaque URL of the form
//! `/uploads/image-<millis>-<random>.<ext>`; the router serves that prefix
//! straight from the upload directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;

/// URL prefix under which stored blobs are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Extension used when the upload has no usable file name.
const FALLBACK_EXTENSION: &str = "bin";

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `data` and return the URL it is served under.
    async fn put(&self, original_name: Option<&str>, data: &[u8]) -> std::io::Result<String>;
}

/// Writes blobs into a local directory.
pub struct LocalBlobStore {
    dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, original_name: Option<&str>, data: &[u8]) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = blob_file_name(original_name);
        tokio::fs::write(self.dir.join(&file_name), data).await?;

        tracing::info!(file_name = %file_name, bytes = data.len(), "Stored uploaded image");
        Ok(format!("{UPLOADS_PREFIX}/{file_name}"))
    }
}

/// `image-<millis>-<random>.<ext>`, keeping the original extension.
pub fn blob_file_name(original_name: Option<&str>) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    let ext = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    format!("image-{millis}-{suffix}.{ext}")
}
