//! Image retrieval from remote locators.

pub mod http;
#[cfg(test)]
pub mod stub;

use std::future::Future;

use thiserror::Error;

pub use http::HttpFetcher;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
}

/// Source of image bytes for a locator.
///
/// Implementations are cloned into every prefetch task, so they should be cheap to clone.
pub trait ImageFetcher: Clone + Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}
