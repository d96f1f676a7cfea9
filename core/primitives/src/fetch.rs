use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Describes a dynamic future.
///
/// Used by batch fetchers and call clients to make the associated
/// return types shorter.
pub type BoxedFuture<Output, Error> =
    Pin<Box<dyn Future<Output = Result<Output, Error>> + Send + 'static>>;

/// The failure of a single key inside an otherwise successful batch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream could not answer right now; a later request may succeed.
    #[error("transient upstream failure: {0:#}")]
    Transient(anyhow::Error),

    /// The upstream answered, and the answer is an error for this key.
    #[error("upstream rejected the lookup: {0:#}")]
    Permanent(anyhow::Error),
}

impl FetchError {
    /// Returns true if repeating the lookup may produce a different result.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Describes a source that resolves many keys with one upstream request.
///
/// The returned vector must contain exactly one result per key, in the order
/// of the keys. An `Err` for the whole batch means that none of the keys
/// could be resolved, for example because the node was unreachable.
pub trait BatchFetch<K, V>: Send + Sync + 'static {
    fn fetch(&self, keys: Vec<K>) -> BoxedFuture<Vec<Result<V, FetchError>>, anyhow::Error>;
}
