//! Local caching of fetched deck images

pub mod image_cache;
pub mod local_store;

pub use image_cache::{CacheStats, FetchStart, ImageCache, ImageRef};
pub use local_store::{LocalHandle, LocalStore};
