//! This module connects the loaders and the contract layer to Ethereum
//! JSON-RPC nodes.
//!
//! Every configured network has its own transport. Batch fetchers group the
//! keys of a batch by network and send one JSON-RPC batch per network.

mod call;
mod error;
mod fetcher;
mod network;
mod registry;
mod rpc;
mod types;

pub use self::call::EthCallClient;
pub use self::error::ChainError;
pub use self::fetcher::{Web3Entity, Web3Fetcher};
pub use self::network::{NetworkEndpoint, Networks};
pub use self::registry::{EntityLoader, LoaderFactory, LoaderRegistry};
pub use self::rpc::{HttpTransport, JsonRpcTransport, RpcCall, RpcError, RpcResult};
pub use self::types::{AddressInfo, Block, BlockTransactionCount, Log, Transaction, TransactionLogs};

#[cfg(test)]
mod test_utils;
