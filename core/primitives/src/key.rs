use strum::{Display, IntoStaticStr};

use crate::NetworkId;

/// Lists all the kinds of entities that can be looked up by key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Block,
    Address,
    Transaction,
    BlockTxCount,
    TransactionLogs,
    ContractCall,
}

/// Identifies an entity within a network.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identity {
    /// A block or transaction hash, or an account address.
    Id(String),

    /// A read of a contract method with specific arguments.
    Call {
        address: String,
        method: String,
        args: Vec<String>,
    },
}

/// Identifies one fetchable blockchain entity.
///
/// Two keys with the same field values are the same key. Hex identifiers
/// are lowercased on construction, so checksummed and plain spellings of
/// an address share one cache slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityKey {
    kind: EntityKind,
    network: NetworkId,
    identity: Identity,
}

impl EntityKey {
    fn with_id(kind: EntityKind, network: NetworkId, id: impl AsRef<str>) -> Self {
        Self {
            kind,
            network,
            identity: Identity::Id(normalize_hex(id.as_ref())),
        }
    }

    pub fn block(network: NetworkId, hash: impl AsRef<str>) -> Self {
        Self::with_id(EntityKind::Block, network, hash)
    }

    pub fn address(network: NetworkId, address: impl AsRef<str>) -> Self {
        Self::with_id(EntityKind::Address, network, address)
    }

    pub fn transaction(network: NetworkId, hash: impl AsRef<str>) -> Self {
        Self::with_id(EntityKind::Transaction, network, hash)
    }

    pub fn block_transaction_count(network: NetworkId, block_hash: impl AsRef<str>) -> Self {
        Self::with_id(EntityKind::BlockTxCount, network, block_hash)
    }

    pub fn transaction_logs(network: NetworkId, transaction_hash: impl AsRef<str>) -> Self {
        Self::with_id(EntityKind::TransactionLogs, network, transaction_hash)
    }

    pub fn contract_call(
        network: NetworkId,
        address: impl AsRef<str>,
        method: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            kind: EntityKind::ContractCall,
            network,
            identity: Identity::Call {
                address: normalize_hex(address.as_ref()),
                method: method.into(),
                args,
            },
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the hash or address that identifies the entity.
    ///
    /// For contract calls, this is the address of the contract.
    pub fn id(&self) -> &str {
        match &self.identity {
            Identity::Id(id) => id,
            Identity::Call { address, .. } => address,
        }
    }
}

fn normalize_hex(value: &str) -> String {
    let value = value.trim();

    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(digits) => format!("0x{}", digits.to_ascii_lowercase()),
        None => value.to_owned(),
    }
}
