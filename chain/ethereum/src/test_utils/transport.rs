use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use chainql_primitives::BoxedFuture;

use crate::JsonRpcTransport;
use crate::RpcCall;
use crate::RpcResult;

type Respond = dyn Fn(&RpcCall) -> RpcResult + Send + Sync;

/// A transport that answers every call with a fixed function and records
/// the batches it receives.
#[derive(Clone)]
pub struct TestTransport {
    respond: Arc<Respond>,
    failures_left: Arc<Mutex<usize>>,
    batches: Arc<Mutex<Vec<Vec<RpcCall>>>>,
}

impl TestTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&RpcCall) -> RpcResult + Send + Sync + 'static,
    {
        Self {
            respond: Arc::new(respond),
            failures_left: Arc::new(Mutex::new(0)),
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Makes the next `count` batches fail as a whole.
    pub fn with_failures(self, count: usize) -> Self {
        *self.failures_left.lock().unwrap() = count;
        self
    }

    pub fn batches(&self) -> Vec<Vec<RpcCall>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.batches.lock().unwrap().iter().map(Vec::len).sum()
    }
}

impl Default for TestTransport {
    fn default() -> Self {
        Self::new(|_| Ok(None))
    }
}

impl JsonRpcTransport for TestTransport {
    fn batch(&self, calls: Vec<RpcCall>) -> BoxedFuture<Vec<RpcResult>, anyhow::Error> {
        self.batches.lock().unwrap().push(calls.clone());

        let fail = {
            let mut failures_left = self.failures_left.lock().unwrap();
            let fail = *failures_left > 0;
            *failures_left = failures_left.saturating_sub(1);
            fail
        };

        let output = if fail {
            Err(anyhow!("connection refused"))
        } else {
            Ok(calls.iter().map(|call| (self.respond)(call)).collect())
        };

        Box::pin(async move { output })
    }
}
