//! Terminal deck of remote images: prefetch with early readiness, classify by swiping, reset.

pub mod app;
pub mod cache;
pub mod deck;
pub mod fetch;
pub mod ui;
