use thiserror::Error;

/// The error returned to callers of a loader.
///
/// Every caller waiting on the same key receives a clone of the same error.
#[derive(Clone, Debug, Error)]
pub enum LoaderError {
    #[error("loader '{loader}' failed to fetch the batch: {message}")]
    Upstream {
        loader: &'static str,
        message: String,
    },

    #[error("loader '{loader}' failed to fetch the key: {message}")]
    Transient {
        loader: &'static str,
        message: String,
    },

    #[error("loader '{loader}' lookup was rejected: {message}")]
    Rejected {
        loader: &'static str,
        message: String,
    },

    #[error("loader '{loader}' received {actual} results for a batch of {expected} keys")]
    BatchShapeMismatch {
        loader: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("loader '{loader}' stopped before the request was resolved")]
    Canceled { loader: &'static str },
}

impl LoaderError {
    /// Returns true if the error is a final answer for the key and can be
    /// served from the cache for the rest of the request.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
