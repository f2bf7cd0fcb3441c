// SPDX-License-Identifier: MPL-2.0
//! On-disk cache of fetched (still encoded) image bytes.
//!
//! Entries are named by the BLAKE3 hash of the locator, so arbitrary URLs map
//! to safe, fixed-length file names.

use crate::error::Result;
use std::path::PathBuf;

const ENTRY_EXTENSION: &str = "img";

#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the cache entry for `locator`.
    #[must_use]
    pub fn entry_path(&self, locator: &str) -> PathBuf {
        let hash = blake3::hash(locator.as_bytes()).to_hex();
        self.dir.join(format!("{}.{}", hash, ENTRY_EXTENSION))
    }

    /// Reads the cached bytes for `locator`, if present.
    pub async fn read(&self, locator: &str) -> Option<Vec<u8>> {
        tokio::fs::read(self.entry_path(locator)).await.ok()
    }

    /// Stores `bytes` for `locator`, replacing any previous entry.
    ///
    /// Writes go to a temporary file first so readers never observe a partial entry.
    pub async fn write(&self, locator: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.entry_path(locator);
        let partial = path.with_extension("part");
        tokio::fs::write(&partial, bytes).await?;
        tokio::fs::rename(&partial, &path).await?;
        Ok(())
    }

    /// Deletes the entry for `locator`; missing entries are not an error.
    pub async fn remove(&self, locator: &str) {
        let _ = tokio::fs::remove_file(self.entry_path(locator)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn entry_names_are_stable_and_distinct() {
        let cache = DiskCache::new(PathBuf::from("/cache"));
        let a = cache.entry_path("https://host/Items/1/Images/Primary");
        let b = cache.entry_path("https://host/Items/2/Images/Primary");

        assert_eq!(a, cache.entry_path("https://host/Items/1/Images/Primary"));
        assert_ne!(a, b);
        assert!(a.starts_with("/cache"));
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some(ENTRY_EXTENSION));
    }

    #[tokio::test]
    async fn write_then_read_returns_bytes() {
        let dir = tempdir().expect("failed to create temp dir");
        let cache = DiskCache::new(dir.path().join("images"));

        cache
            .write("https://host/a.png", b"payload")
            .await
            .expect("write succeeds");

        assert_eq!(cache.read("https://host/a.png").await.as_deref(), Some(&b"payload"[..]));
        assert!(cache.read("https://host/b.png").await.is_none());
    }

    #[tokio::test]
    async fn remove_deletes_entry() {
        let dir = tempdir().expect("failed to create temp dir");
        let cache = DiskCache::new(dir.path().to_path_buf());

        cache.write("x", b"1").await.expect("write succeeds");
        cache.remove("x").await;
        cache.remove("never-written").await;

        assert!(cache.read("x").await.is_none());
    }
}
