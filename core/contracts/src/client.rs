use alloy_primitives::Address;
use alloy_primitives::Bytes;
use chainql_primitives::BoxedFuture;
use chainql_primitives::NetworkId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallError {
    #[error("network '{0}' is not configured")]
    UnknownNetwork(NetworkId),

    #[error("transport failure: {0:#}")]
    Transport(anyhow::Error),

    #[error("execution reverted: {0}")]
    Reverted(String),

    #[error("node returned an error: {0}")]
    Rpc(String),

    #[error("node returned no data")]
    EmptyResult,
}

/// Executes read-only contract calls against a node.
///
/// Implementations own their timeout policy; a timeout is reported
/// as a [CallError::Transport].
pub trait ContractCallClient: Send + Sync + 'static {
    fn read_method(
        &self,
        network: &NetworkId,
        address: Address,
        call_data: Bytes,
    ) -> BoxedFuture<Bytes, CallError>;
}
