// SPDX-License-Identifier: MPL-2.0
//! Asynchronous image loading with memory and disk caching.
//!
//! The loader resolves an [`ImageRequest`] to decoded [`ImageData`]:
//!
//! 1. memory cache (decoded images, LRU, byte-bounded)
//! 2. disk cache (encoded bytes keyed by locator hash, remote locators only)
//! 3. the source itself (`http`/`https` via `reqwest`, `file` via `tokio::fs`)
//!
//! Decoding runs on the blocking pool. Loads are plain futures: dropping one
//! (e.g. by aborting the `iced` task that drives it) cancels the transfer.

mod disk;
mod memory;

pub use disk::DiskCache;
pub use memory::{CacheStats, MemoryCache};

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::media::{self, ImageData};
use reqwest::Url;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// A single load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Opaque locator, typically an HTTP URL. Passed through unmodified.
    pub locator: Option<String>,
    /// Whether the result should crossfade over the placeholder.
    pub crossfade: bool,
}

impl ImageRequest {
    #[must_use]
    pub fn new(locator: Option<String>) -> Self {
        Self {
            locator,
            crossfade: true,
        }
    }

    #[must_use]
    pub fn crossfade(mut self, enabled: bool) -> Self {
        self.crossfade = enabled;
        self
    }

    /// The locator if it is present and not blank.
    #[must_use]
    pub fn usable_locator(&self) -> Option<&str> {
        self.locator
            .as_deref()
            .filter(|locator| !locator.trim().is_empty())
    }
}

/// Where the bytes for a locator come from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Remote(Url),
    File(PathBuf),
}

fn classify(locator: &str) -> Result<Source> {
    let url = Url::parse(locator).map_err(|_| Error::UnsupportedLocator(locator.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(Source::Remote(url)),
        "file" => url
            .to_file_path()
            .map(Source::File)
            .map_err(|()| Error::UnsupportedLocator(locator.to_string())),
        _ => Err(Error::UnsupportedLocator(locator.to_string())),
    }
}

struct Inner {
    client: reqwest::Client,
    memory: Mutex<MemoryCache>,
    disk: Option<DiskCache>,
    max_download_bytes: u64,
}

/// Shared, cheaply clonable image loader.
#[derive(Clone)]
pub struct ImageLoader {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("disk", &self.inner.disk)
            .field("max_download_bytes", &self.inner.max_download_bytes)
            .finish()
    }
}

impl ImageLoader {
    /// Builds a loader from configuration.
    ///
    /// `disk_dir` enables the disk cache when `config.disk_cache` allows it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] if the HTTP client cannot be created (e.g. TLS
    /// backend initialization failure).
    pub fn new(config: &LoaderConfig, disk_dir: Option<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;

        let disk = if config.disk_cache.unwrap_or(crate::config::DEFAULT_DISK_CACHE) {
            disk_dir.map(DiskCache::new)
        } else {
            None
        };

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                memory: Mutex::new(MemoryCache::new(
                    config.memory_entries(),
                    config.memory_bytes(),
                )),
                disk,
                max_download_bytes: config.max_download_bytes(),
            }),
        })
    }

    fn memory(&self) -> MutexGuard<'_, MemoryCache> {
        match self.inner.memory.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Synchronous memory-cache lookup.
    ///
    /// Lets the UI show an already decoded image on the first frame instead of
    /// flashing the placeholder.
    #[must_use]
    pub fn cached(&self, locator: &str) -> Option<ImageData> {
        self.memory().get(locator)
    }

    /// Memory cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.memory().stats()
    }

    /// Drops every decoded image held in memory.
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// Resolves `request` to a decoded image.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingLocator`] for absent or blank locators
    /// - [`Error::UnsupportedLocator`] for relative paths or unknown schemes
    /// - [`Error::Io`] / [`Error::Fetch`] when the bytes cannot be obtained
    /// - [`Error::Decode`] / [`Error::Svg`] when they are not a valid image
    pub async fn load(&self, request: ImageRequest) -> Result<ImageData> {
        let locator = request.usable_locator().ok_or(Error::MissingLocator)?;

        if let Some(image) = self.cached(locator) {
            tracing::trace!(locator, "memory cache hit");
            return Ok(image);
        }

        let image = match classify(locator)? {
            Source::File(path) => {
                let bytes = tokio::fs::read(&path).await?;
                decode(bytes).await?
            }
            Source::Remote(url) => self.load_remote(locator, url).await?,
        };

        self.memory().insert(locator.to_string(), image.clone());
        Ok(image)
    }

    async fn load_remote(&self, locator: &str, url: Url) -> Result<ImageData> {
        if let Some(disk) = &self.inner.disk {
            if let Some(bytes) = disk.read(locator).await {
                match decode(bytes).await {
                    Ok(image) => {
                        tracing::trace!(locator, "disk cache hit");
                        return Ok(image);
                    }
                    Err(err) => {
                        tracing::debug!(locator, error = %err, "dropping unreadable disk cache entry");
                        disk.remove(locator).await;
                    }
                }
            }
        }

        let bytes = self.fetch(url).await?;
        let image = decode(bytes.clone()).await?;

        if let Some(disk) = &self.inner.disk {
            if let Err(err) = disk.write(locator, &bytes).await {
                tracing::warn!(locator, error = %err, "failed to persist image in disk cache");
            }
        }

        Ok(image)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>> {
        use futures_util::StreamExt;

        let limit = self.inner.max_download_bytes;
        let response = self.inner.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!("HTTP status: {}", response.status())));
        }

        if let Some(length) = response.content_length() {
            if length > limit {
                return Err(Error::Fetch(format!(
                    "Response too large ({length} bytes, limit {limit})"
                )));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() as u64 + chunk.len() as u64 > limit {
                return Err(Error::Fetch(format!("Response exceeded {limit} bytes")));
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url = %url, bytes = body.len(), "fetched image");
        Ok(body)
    }
}

async fn decode(bytes: Vec<u8>) -> Result<ImageData> {
    tokio::task::spawn_blocking(move || media::decode_bytes(&bytes))
        .await
        .unwrap_or_else(|e| Err(Error::Decode(format!("Decode task failed: {e}"))))
}
