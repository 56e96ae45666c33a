//! Image cache keyed by source locator.
//!
//! Successful fetches are stored as handles into a [`LocalStore`]. Failed fetches store the
//! remote locator itself so the view can still try to load it directly. Every local
//! handle is revoked before its entry leaves the map.
//!
//! In-flight locators remember the pass that issued them, so a result arriving after its
//! pass was replaced can clear its own bookkeeping without touching a newer pass.

use std::collections::HashMap;

use super::local_store::{LocalHandle, LocalStore};
use crate::fetch::{FetchError, ImageFetcher};

/// What the view renders for a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Fetched bytes held locally
    Local(LocalHandle),
    /// Fetch failed; the original remote locator
    Remote(String),
}

impl ImageRef {
    pub fn is_local(&self) -> bool {
        matches!(self, ImageRef::Local(_))
    }
}

/// Result of starting a fetch through the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStart {
    /// Already cached; no network work needed
    Hit(ImageRef),
    /// Marked in-flight; the caller must report back through `complete_fetch`
    Issued,
}

/// Pass tag used by [`ImageCache::fetch`], which is not part of a prefetch pass
const DIRECT_PASS: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub fallbacks: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct ImageCache {
    /// Map from source locator to cached reference
    entries: HashMap<String, ImageRef>,
    /// Locators currently being fetched, with the pass that last issued each
    in_flight: HashMap<String, u64>,
    store: LocalStore,
    hits: u64,
    misses: u64,
    fallbacks: u64,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `url` through the cache, returning immediately on a hit.
    ///
    /// The cache stays mutably borrowed across the network await, so fetches made this way
    /// run one at a time. Concurrent prefetching issues with [`ImageCache::begin_fetch`],
    /// awaits the fetcher outside the cache and settles with [`ImageCache::complete_fetch`].
    pub async fn fetch<F: ImageFetcher>(&mut self, fetcher: &F, url: &str) -> ImageRef {
        if let FetchStart::Hit(image) = self.begin_fetch(url, DIRECT_PASS) {
            return image;
        }
        let outcome = fetcher.fetch(url).await;
        self.complete_fetch(url, outcome)
    }

    /// Check for a cached entry, otherwise mark `url` as in-flight for `pass`
    pub fn begin_fetch(&mut self, url: &str, pass: u64) -> FetchStart {
        if let Some(image) = self.entries.get(url) {
            self.hits += 1;
            return FetchStart::Hit(image.clone());
        }

        self.misses += 1;
        if self.in_flight.insert(url.to_string(), pass).is_some() {
            log::debug!("Re-issuing fetch for in-flight image: {}", url);
        }
        FetchStart::Issued
    }

    /// Record the outcome of a fetch started with `begin_fetch`
    pub fn complete_fetch(&mut self, url: &str, outcome: Result<Vec<u8>, FetchError>) -> ImageRef {
        self.in_flight.remove(url);

        // A duplicate fetch settled first; keep its entry so each url owns one handle
        if let Some(existing) = self.entries.get(url) {
            return existing.clone();
        }

        let image = match outcome {
            Ok(bytes) => {
                let handle = self.store.create(bytes);
                log::debug!("Cached image {} as {}", url, handle);
                ImageRef::Local(handle)
            }
            Err(e) => {
                self.fallbacks += 1;
                log::warn!("Image fetch failed for {}, using remote fallback: {}", url, e);
                ImageRef::Remote(url.to_string())
            }
        };

        self.entries.insert(url.to_string(), image.clone());
        image
    }

    /// Settle a fetch whose pass was replaced: forget it as in-flight unless a newer pass
    /// re-issued the same locator. The outcome is discarded and no entry is written.
    pub fn abandon_fetch(&mut self, url: &str, pass: u64) -> bool {
        if self.in_flight.get(url) == Some(&pass) {
            self.in_flight.remove(url);
            true
        } else {
            false
        }
    }

    pub fn get(&self, url: &str) -> Option<&ImageRef> {
        self.entries.get(url)
    }

    /// Bytes behind a local reference; `None` for remote fallbacks and revoked handles
    pub fn bytes(&self, image: &ImageRef) -> Option<&[u8]> {
        match image {
            ImageRef::Local(handle) => self.store.get(handle),
            ImageRef::Remote(_) => None,
        }
    }

    /// Free the local reference for `url` (if any) and forget the entry
    pub fn release(&mut self, url: &str) {
        if let Some(ImageRef::Local(handle)) = self.entries.remove(url) {
            self.store.revoke(&handle);
        }
    }

    /// Release every entry, then clear the map and in-flight bookkeeping
    pub fn release_all(&mut self) {
        if self.entries.is_empty() && self.in_flight.is_empty() {
            return;
        }
        self.log_stats();

        for (_, image) in self.entries.drain() {
            if let ImageRef::Local(handle) = image {
                self.store.revoke(&handle);
            }
        }
        self.in_flight.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_in_flight(&self, url: &str) -> bool {
        self.in_flight.contains_key(url)
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Number of local handles not yet revoked
    pub fn live_handles(&self) -> usize {
        self.store.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            fallbacks: self.fallbacks,
            entries: self.entries.len(),
        }
    }

    pub fn log_stats(&self) {
        let total = self.hits + self.misses;
        if total > 0 {
            let hit_rate = (self.hits as f64 / total as f64) * 100.0;
            log::debug!(
                "Image cache: {} hits, {} misses ({:.1}% hit rate), {} fallbacks, {} entries",
                self.hits,
                self.misses,
                hit_rate,
                self.fallbacks,
                self.entries.len()
            );
        }
    }
}

impl Drop for ImageCache {
    fn drop(&mut self) {
        self.release_all();
    }
}
