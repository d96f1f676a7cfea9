//! This module contains the request-scoped batching and caching engine
//! used by resolvers to fetch entities.
//!
//! A [BatchLoader] collects the keys requested during a short window,
//! sends the de-duplicated keys to its fetcher in one call, and remembers
//! the results for as long as the loader lives. Loaders are meant to be
//! created per request and dropped with it.

mod cache;
mod config;
mod error;
mod loader;
mod window;

pub use self::cache::CacheEntry;
pub use self::config::LoaderConfig;
pub use self::error::LoaderError;
pub use self::loader::BatchLoader;
pub use self::window::{BatchWindow, LoadRequest};

#[cfg(test)]
mod test_utils;
