use crate::LoaderError;

/// A settled lookup, kept for the lifetime of the loader.
///
/// Entries are never updated once inserted.
#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    value: Result<V, LoaderError>,
}

impl<V> CacheEntry<V> {
    pub fn new(value: Result<V, LoaderError>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Result<V, LoaderError> {
        &self.value
    }
}
