use std::time::Duration;

const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1);

/// Controls how loaders group keys into upstream requests.
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    batch_delay: Duration,
    max_batch_size: Option<usize>,
}

impl LoaderConfig {
    /// Sets the time a window stays open after its first key is registered.
    ///
    /// A zero delay dispatches the window after a single scheduler yield.
    /// Coalescing is then best-effort: on a multi-threaded runtime the window
    /// may be dispatched before every sibling lookup has registered its key.
    pub fn with_batch_delay(self, batch_delay: Duration) -> Self {
        let Self {
            batch_delay: _,
            max_batch_size,
        } = self;

        Self {
            batch_delay,
            max_batch_size,
        }
    }

    /// Limits the number of keys sent to the fetcher in one call.
    ///
    /// Without a limit every window is sent in a single call. With a limit,
    /// larger windows are split into several concurrent fetches that still
    /// settle together.
    pub fn with_max_batch_size(self, max_batch_size: usize) -> Self {
        let Self {
            batch_delay,
            max_batch_size: _,
        } = self;

        Self {
            batch_delay,
            max_batch_size: Some(max_batch_size.max(1)),
        }
    }

    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }

    pub fn max_batch_size(&self) -> Option<usize> {
        self.max_batch_size
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_delay: DEFAULT_BATCH_DELAY,
            max_batch_size: None,
        }
    }
}
