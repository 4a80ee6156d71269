//! Blob storage for uploaded profile assets.
//!
//! The auth subsystem only needs one capability from object storage: write
//! a byte buffer under a name and get back a stable retrieval URL. The
//! filesystem implementation below covers local development and single-node
//! deployments; anything else can slot in behind the same trait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::config::Config;

/// Contract for durable blob storage.
///
/// Implementations must return a URL that stays valid for the lifetime of
/// the blob; callers do not re-derive it. Reachability of the URL is not
/// checked here or anywhere downstream.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under `blob_name` and returns the retrieval URL.
    async fn store(&self, blob_name: &str, bytes: &[u8], content_type: &str) -> Result<String>;
}

/// Filesystem-backed blob store.
///
/// Writes blobs under a configured directory and addresses them through a
/// configured public base URL.
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    /// Creates a new FsBlobStore from the application config.
    pub fn new(config: &Config) -> Self {
        Self {
            root: PathBuf::from(&config.blob_storage_dir),
            public_base_url: config.blob_public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn store(&self, blob_name: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        fs::create_dir_all(&self.root)
            .await
            .context("creating blob storage directory")?;

        let path = self.root.join(blob_name);
        fs::write(&path, bytes)
            .await
            .with_context(|| format!("writing blob {}", path.display()))?;

        tracing::debug!(
            blob = blob_name,
            content_type,
            size = bytes.len(),
            "stored profile asset"
        );

        Ok(format!("{}/{}", self.public_base_url, blob_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (FsBlobStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("blob-store-test-{}", std::process::id()));
        let store = FsBlobStore {
            root: root.clone(),
            public_base_url: "http://localhost:3000/uploads".to_string(),
        };
        (store, root)
    }

    #[tokio::test]
    async fn test_store_writes_bytes_and_returns_url() {
        let (store, root) = test_store();

        let url = store
            .store("1-1700000000000-selfie.png", b"png bytes", "image/png")
            .await
            .unwrap();

        assert_eq!(
            url,
            "http://localhost:3000/uploads/1-1700000000000-selfie.png"
        );
        let written = std::fs::read(root.join("1-1700000000000-selfie.png")).unwrap();
        assert_eq!(written, b"png bytes");

        std::fs::remove_dir_all(&root).ok();
    }
}
