use std::sync::{Arc, Mutex};

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;
use alloy_primitives::Bytes;
use chainql_primitives::BoxedFuture;
use chainql_primitives::NetworkId;

use crate::CallError;
use crate::ContractCallClient;

type Respond = dyn Fn(&NetworkId, Address, &Bytes) -> Result<Bytes, CallError> + Send + Sync;

/// A call client that answers with a fixed function and records every call.
pub struct TestCallClient {
    respond: Box<Respond>,
    calls: Arc<Mutex<Vec<(Address, Bytes)>>>,
}

impl TestCallClient {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&NetworkId, Address, &Bytes) -> Result<Bytes, CallError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContractCallClient for TestCallClient {
    fn read_method(
        &self,
        network: &NetworkId,
        address: Address,
        call_data: Bytes,
    ) -> BoxedFuture<Bytes, CallError> {
        self.calls.lock().unwrap().push((address, call_data.clone()));

        let output = (self.respond)(network, address, &call_data);

        Box::pin(async move { output })
    }
}

/// Encodes a single return value the way a node would return it.
pub fn encode_output(value: DynSolValue) -> Bytes {
    DynSolValue::Tuple(vec![value]).abi_encode_params().into()
}

/// Returns the 4-byte selector of the call data.
pub fn selector(call_data: &Bytes) -> [u8; 4] {
    let mut selector = [0; 4];
    selector.copy_from_slice(&call_data[..4]);
    selector
}
