use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use chainql_primitives::BatchFetch;
use chainql_primitives::FetchError;
use futures::future::join_all;
use futures::FutureExt;
use slog::{debug, error, warn, Logger};
use tokio::sync::oneshot;

use crate::window::Completion;
use crate::BatchWindow;
use crate::CacheEntry;
use crate::LoadRequest;
use crate::LoaderConfig;
use crate::LoaderError;

/// Coalesces lookups of individual keys into batched upstream fetches,
/// and caches the results for its own lifetime.
///
/// Cloning a loader is cheap; clones share the cache and the open window.
pub struct BatchLoader<K, V> {
    inner: Arc<Inner<K, V>>,
}

struct Inner<K, V> {
    name: &'static str,
    fetcher: Arc<dyn BatchFetch<K, V>>,
    config: LoaderConfig,
    logger: Logger,
    state: Mutex<LoaderState<K, V>>,
}

struct LoaderState<K, V> {
    cache: HashMap<K, CacheEntry<V>>,
    in_flight: HashMap<K, Vec<Completion<V>>>,
    window: BatchWindow<K, V>,
}

enum ChunkOutcome<V> {
    Fetched {
        expected: usize,
        results: Vec<Result<V, FetchError>>,
    },
    Failed {
        expected: usize,
        message: String,
    },
}

enum Lookup<V> {
    Ready(Result<V, LoaderError>),
    Pending(oneshot::Receiver<Result<V, LoaderError>>),
}

impl<K, V> Clone for BatchLoader<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> BatchLoader<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new loader with an empty cache.
    ///
    /// The name is only used in errors and logs.
    pub fn new(
        name: &'static str,
        fetcher: Arc<dyn BatchFetch<K, V>>,
        config: LoaderConfig,
        logger: Logger,
    ) -> Self {
        let logger = logger.new(slog::o!("loader" => name));

        Self {
            inner: Arc::new(Inner {
                name,
                fetcher,
                config,
                logger,
                state: Mutex::new(LoaderState {
                    cache: HashMap::new(),
                    in_flight: HashMap::new(),
                    window: BatchWindow::new(),
                }),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Returns the value for a key, fetching it with the other keys
    /// of the current window if it is not cached yet.
    pub async fn load(&self, key: K) -> Result<V, LoaderError> {
        let lookup = self.enqueue(key);
        self.resolve(lookup).await
    }

    /// Returns one result per key, in the order of the keys.
    ///
    /// All keys are registered in the same window before waiting on any of them.
    pub async fn load_many<I>(&self, keys: I) -> Vec<Result<V, LoaderError>>
    where
        I: IntoIterator<Item = K>,
    {
        let lookups: Vec<_> = keys.into_iter().map(|key| self.enqueue(key)).collect();

        join_all(lookups.into_iter().map(|lookup| self.resolve(lookup))).await
    }

    /// Dispatches the current window without waiting for the batch delay.
    ///
    /// The dispatch keeps running even if the returned future is dropped.
    pub async fn flush(&self) {
        let inner = self.inner.clone();

        if let Err(err) = tokio::spawn(async move { inner.dispatch(None).await }).await {
            error!(self.inner.logger, "Window dispatch stopped unexpectedly"; "error" => err.to_string());
        }
    }

    /// Returns the number of settled keys in the cache.
    pub fn cached_len(&self) -> usize {
        self.inner.lock_state().cache.len()
    }

    fn enqueue(&self, key: K) -> Lookup<V> {
        let mut state = self.inner.lock_state();

        if let Some(entry) = state.cache.get(&key) {
            return Lookup::Ready(entry.value().clone());
        }

        let (completion, receiver) = oneshot::channel();

        if let Some(waiting) = state.in_flight.get_mut(&key) {
            waiting.push(completion);
            return Lookup::Pending(receiver);
        }

        state.window.push(LoadRequest::new(key, completion));

        if state.window.mark_scheduled() {
            self.schedule_dispatch(state.window.id());
        }

        Lookup::Pending(receiver)
    }

    fn schedule_dispatch(&self, window_id: u64) {
        let inner = self.inner.clone();
        let delay = inner.config.batch_delay();

        tokio::spawn(async move {
            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }

            inner.dispatch(Some(window_id)).await;
        });
    }

    async fn resolve(&self, lookup: Lookup<V>) -> Result<V, LoaderError> {
        match lookup {
            Lookup::Ready(result) => result,
            Lookup::Pending(receiver) => receiver.await.unwrap_or(Err(LoaderError::Canceled {
                loader: self.inner.name,
            })),
        }
    }
}

impl<K, V> Inner<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn lock_state(&self) -> MutexGuard<'_, LoaderState<K, V>> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }

    // Closes the window and sends its keys upstream.
    //
    // When called by a scheduled timer, the window ID guards against
    // dispatching a newer window that was opened after an explicit flush.
    async fn dispatch(&self, window_id: Option<u64>) {
        let keys = {
            let mut state = self.lock_state();

            if window_id.is_some_and(|id| id != state.window.id()) {
                return;
            }

            let requests = state.window.take();
            let mut keys = Vec::with_capacity(requests.len());

            for LoadRequest { key, completion } in requests {
                match state.in_flight.entry(key) {
                    Entry::Occupied(mut entry) => entry.get_mut().push(completion),
                    Entry::Vacant(entry) => {
                        keys.push(entry.key().clone());
                        entry.insert(vec![completion]);
                    }
                }
            }

            keys
        };

        if keys.is_empty() {
            return;
        }

        debug!(self.logger, "Dispatching batch"; "keys" => keys.len());

        let chunks: Vec<Vec<K>> = match self.config.max_batch_size() {
            Some(size) => keys.chunks(size).map(<[K]>::to_vec).collect(),
            None => vec![keys.clone()],
        };

        let outcomes = join_all(chunks.into_iter().map(|chunk| self.fetch_chunk(chunk))).await;
        let results = self.window_results(keys.len(), outcomes);

        self.settle(keys, results);
    }

    async fn fetch_chunk(&self, keys: Vec<K>) -> ChunkOutcome<V> {
        let expected = keys.len();
        let fetch = AssertUnwindSafe(async move { self.fetcher.fetch(keys).await }).catch_unwind();

        match fetch.await {
            Ok(Ok(results)) => ChunkOutcome::Fetched { expected, results },
            Ok(Err(err)) => {
                warn!(
                    self.logger,
                    "Batch fetch failed";
                    "keys" => expected,
                    "error" => format!("{err:#}")
                );

                ChunkOutcome::Failed {
                    expected,
                    message: format!("{err:#}"),
                }
            }
            Err(_) => {
                error!(self.logger, "Batch fetch panicked"; "keys" => expected);

                ChunkOutcome::Failed {
                    expected,
                    message: "batch fetch panicked".to_owned(),
                }
            }
        }
    }

    // Aligns the chunk outcomes with the keys of the window.
    //
    // A chunk with the wrong number of results fails the whole window.
    fn window_results(
        &self,
        total: usize,
        outcomes: Vec<ChunkOutcome<V>>,
    ) -> Vec<Result<V, LoaderError>> {
        let mismatched = outcomes.iter().any(|outcome| match outcome {
            ChunkOutcome::Fetched { expected, results } => results.len() != *expected,
            ChunkOutcome::Failed { .. } => false,
        });

        if mismatched {
            let actual: usize = outcomes
                .iter()
                .map(|outcome| match outcome {
                    ChunkOutcome::Fetched { results, .. } => results.len(),
                    ChunkOutcome::Failed { .. } => 0,
                })
                .sum();

            error!(
                self.logger,
                "Batch fetch returned a mismatched number of results";
                "expected" => total,
                "actual" => actual
            );

            return vec![
                Err(LoaderError::BatchShapeMismatch {
                    loader: self.name,
                    expected: total,
                    actual,
                });
                total
            ];
        }

        let mut results = Vec::with_capacity(total);

        for outcome in outcomes {
            match outcome {
                ChunkOutcome::Fetched {
                    expected: _,
                    results: fetched,
                } => results.extend(
                    fetched
                        .into_iter()
                        .map(|result| result.map_err(|err| self.key_error(err))),
                ),
                ChunkOutcome::Failed { expected, message } => {
                    let err = LoaderError::Upstream {
                        loader: self.name,
                        message,
                    };

                    results.extend(vec![Err(err); expected]);
                }
            }
        }

        results
    }

    fn key_error(&self, err: FetchError) -> LoaderError {
        let loader = self.name;

        match err {
            FetchError::Transient(err) => LoaderError::Transient {
                loader,
                message: format!("{err:#}"),
            },
            FetchError::Permanent(err) => LoaderError::Rejected {
                loader,
                message: format!("{err:#}"),
            },
        }
    }

    // Stores the final results and wakes every caller waiting on the keys.
    fn settle(&self, keys: Vec<K>, results: Vec<Result<V, LoaderError>>) {
        let mut completed = Vec::with_capacity(keys.len());

        {
            let mut state = self.lock_state();

            for (key, result) in keys.into_iter().zip(results) {
                let waiting = state.in_flight.remove(&key).unwrap_or_default();

                let cacheable = match &result {
                    Ok(_) => true,
                    Err(err) => err.is_cacheable(),
                };

                if cacheable {
                    state.cache.insert(key, CacheEntry::new(result.clone()));
                }

                completed.push((waiting, result));
            }
        }

        for (waiting, result) in completed {
            for completion in waiting {
                // The caller may have gone away; the result stays cached for others.
                let _ = completion.send(result.clone());
            }
        }
    }
}
