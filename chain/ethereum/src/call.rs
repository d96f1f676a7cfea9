use alloy_primitives::Address;
use alloy_primitives::Bytes;
use anyhow::anyhow;
use chainql_contracts::CallError;
use chainql_contracts::ContractCallClient;
use chainql_primitives::BoxedFuture;
use chainql_primitives::NetworkId;
use serde_json::json;

use crate::Networks;
use crate::RpcCall;
use crate::RpcError;

/// Reads contract state with `eth_call` at the latest block.
#[derive(Clone)]
pub struct EthCallClient {
    networks: Networks,
}

impl EthCallClient {
    pub fn new(networks: Networks) -> Self {
        Self { networks }
    }
}

impl ContractCallClient for EthCallClient {
    fn read_method(
        &self,
        network: &NetworkId,
        address: Address,
        call_data: Bytes,
    ) -> BoxedFuture<Bytes, CallError> {
        let transport = self.networks.transport(network);
        let network = network.clone();

        Box::pin(async move {
            let transport = transport.ok_or(CallError::UnknownNetwork(network))?;

            let call = RpcCall::new(
                "eth_call",
                json!([{ "to": address, "data": call_data }, "latest"]),
            );

            let mut results = transport
                .batch(vec![call])
                .await
                .map_err(CallError::Transport)?;

            let result = results
                .pop()
                .ok_or_else(|| CallError::Transport(anyhow!("node returned no result")))?;

            let output = match result {
                Ok(Some(output)) => output,
                Ok(None) => return Err(CallError::EmptyResult),
                Err(err) => return Err(call_error(err)),
            };

            let output: Bytes = serde_json::from_value(output)
                .map_err(|err| CallError::Rpc(format!("malformed call result: {err}")))?;

            // Calls to accounts without code succeed with no data.
            if output.is_empty() {
                return Err(CallError::EmptyResult);
            }

            Ok(output)
        })
    }
}

fn call_error(err: RpcError) -> CallError {
    if err.is_revert() {
        let reason = match &err {
            RpcError::Node {
                data: Some(data), ..
            } => data.clone(),
            RpcError::Node { message, .. } => message.clone(),
            RpcError::MissingResponse(_) => String::new(),
        };

        return CallError::Reverted(reason);
    }

    if err.is_retryable() {
        return CallError::Transport(err.into());
    }

    CallError::Rpc(err.to_string())
}
