use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use chainql_primitives::BatchFetch;
use chainql_primitives::BoxedFuture;
use chainql_primitives::FetchError;

type Respond<K, V> =
    dyn Fn(&[K]) -> Result<Vec<Result<V, FetchError>>, anyhow::Error> + Send + Sync + 'static;

/// A fetcher that answers with a fixed function and records every batch it receives.
pub struct TestFetcher<K, V> {
    respond: Box<Respond<K, V>>,
    delay: Duration,
    failures_left: Arc<Mutex<usize>>,
    calls: Arc<Mutex<Vec<Vec<K>>>>,
}

impl<K, V> TestFetcher<K, V> {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&[K]) -> Result<Vec<Result<V, FetchError>>, anyhow::Error> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delay: Duration::ZERO,
            failures_left: Arc::new(Mutex::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Makes the next `count` batches fail as a whole.
    pub fn with_failures(self, count: usize) -> Self {
        *self.failures_left.lock().unwrap() = count;
        self
    }

    /// Delays every answer.
    pub fn with_delay(self, delay: Duration) -> Self {
        let Self {
            respond,
            delay: _,
            failures_left,
            calls,
        } = self;

        Self {
            respond,
            delay,
            failures_left,
            calls,
        }
    }

    pub fn calls(&self) -> Vec<Vec<K>>
    where
        K: Clone,
    {
        self.calls.lock().unwrap().clone()
    }
}

impl<K, V> BatchFetch<K, V> for TestFetcher<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
{
    fn fetch(&self, keys: Vec<K>) -> BoxedFuture<Vec<Result<V, FetchError>>, anyhow::Error> {
        self.calls.lock().unwrap().push(keys.clone());

        let fail = {
            let mut failures_left = self.failures_left.lock().unwrap();
            let fail = *failures_left > 0;
            *failures_left = failures_left.saturating_sub(1);
            fail
        };

        let output = if fail {
            Err(anyhow!("connection refused"))
        } else {
            (self.respond)(&keys)
        };

        let delay = self.delay;

        Box::pin(async move {
            tokio::time::sleep(delay).await;
            output
        })
    }
}
