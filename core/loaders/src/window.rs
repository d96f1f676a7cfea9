use std::mem;

use tokio::sync::oneshot;

use crate::LoaderError;

pub(crate) type Completion<V> = oneshot::Sender<Result<V, LoaderError>>;

/// One caller waiting for a key.
pub struct LoadRequest<K, V> {
    pub(crate) key: K,
    pub(crate) completion: Completion<V>,
}

impl<K, V> LoadRequest<K, V> {
    pub(crate) fn new(key: K, completion: Completion<V>) -> Self {
        Self { key, completion }
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

/// The requests registered since the last dispatch, in arrival order.
///
/// Taking the requests closes the window; the next request opens a new one
/// with a new ID.
pub struct BatchWindow<K, V> {
    id: u64,
    requests: Vec<LoadRequest<K, V>>,
    scheduled: bool,
}

impl<K, V> BatchWindow<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            id: 0,
            requests: Vec::new(),
            scheduled: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn push(&mut self, request: LoadRequest<K, V>) {
        self.requests.push(request);
    }

    // Returns true only for the first caller, which is then responsible
    // for arranging the dispatch of this window.
    pub(crate) fn mark_scheduled(&mut self) -> bool {
        !mem::replace(&mut self.scheduled, true)
    }

    pub(crate) fn take(&mut self) -> Vec<LoadRequest<K, V>> {
        self.id += 1;
        self.scheduled = false;

        mem::take(&mut self.requests)
    }
}
