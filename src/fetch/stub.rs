//! In-memory fetchers for tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;

use super::{FetchError, ImageFetcher};

/// Serves fixed bytes per url, 404 for anything else, and counts calls
#[derive(Clone, Default)]
pub struct StubFetcher {
    responses: Arc<HashMap<String, Vec<u8>>>,
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Semaphore>>,
}

impl StubFetcher {
    /// Serve `bytes` for `url`
    pub fn serving(mut self, url: &str, bytes: &[u8]) -> Self {
        Arc::make_mut(&mut self.responses).insert(url.to_string(), bytes.to_vec());
        self
    }

    /// Fetcher where every fetch succeeds with `bytes`
    pub fn always(bytes: &[u8]) -> Self {
        Self::default().serving("", bytes)
    }

    /// Block every fetch until a permit is released with `open`
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let `count` more blocked fetches through
    pub fn open(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if let Some(gate) = &self.gate
            && let Ok(permit) = gate.acquire().await
        {
            permit.forget();
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.responses
            .get(url)
            .or_else(|| self.responses.get(""))
            .cloned()
            .ok_or(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
    }
}
