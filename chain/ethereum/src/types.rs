use alloy_primitives::Address;
use alloy_primitives::Bytes;
use alloy_primitives::B256;
use alloy_primitives::U256;
use alloy_primitives::U64;
use serde::Deserialize;

/// A block as returned by `eth_getBlockByHash`, with transaction hashes only.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub hash: B256,
    pub parent_hash: B256,
    pub number: U64,
    pub timestamp: U64,
    pub miner: Address,
    #[serde(default)]
    pub difficulty: U256,
    pub gas_limit: U64,
    pub gas_used: U64,
    #[serde(default)]
    pub size: Option<U64>,
    #[serde(default)]
    pub extra_data: Bytes,
    #[serde(default)]
    pub transactions: Vec<B256>,
    #[serde(default)]
    pub uncles: Vec<B256>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: B256,
    #[serde(default)]
    pub block_hash: Option<B256>,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_index: Option<U64>,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    pub value: U256,
    pub gas: U64,
    #[serde(default)]
    pub gas_price: Option<U256>,
    pub nonce: U64,
    #[serde(default)]
    pub input: Bytes,
}

/// The state of an account at the latest block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressInfo {
    pub address: Address,
    pub balance: U256,
    pub transaction_count: U64,
    pub code: Bytes,
}

impl AddressInfo {
    pub fn is_contract(&self) -> bool {
        !self.code.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockTransactionCount {
    pub block_hash: B256,
    pub count: U64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<B256>,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub log_index: Option<U64>,
    #[serde(default)]
    pub removed: bool,
}

/// The logs emitted by a mined transaction, taken from its receipt.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLogs {
    pub transaction_hash: B256,
    #[serde(default)]
    pub logs: Vec<Log>,
}
