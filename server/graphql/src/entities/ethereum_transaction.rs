use std::sync::Arc;

use async_graphql::Context;
use async_graphql::Object;
use async_graphql::Result;
use chainql_chain_ethereum::Transaction;
use chainql_primitives::EntityKey;
use chainql_primitives::NetworkId;

use crate::entities::BigInt;
use crate::entities::Bytes;
use crate::entities::EthereumAddress;
use crate::entities::EthereumBlock;
use crate::entities::EthereumLog;
use crate::resolvers::context::loaders;

#[derive(Clone, Debug)]
pub struct EthereumTransaction {
    pub network: NetworkId,
    pub transaction: Arc<Transaction>,
}

impl EthereumTransaction {
    pub fn new(network: NetworkId, transaction: Arc<Transaction>) -> Self {
        Self {
            network,
            transaction,
        }
    }
}

#[Object]
/// A transaction on an Ethereum network.
impl EthereumTransaction {
    pub async fn network(&self) -> &str {
        self.network.as_str()
    }

    pub async fn hash(&self) -> String {
        self.transaction.hash.to_string()
    }

    pub async fn nonce(&self) -> u64 {
        self.transaction.nonce.as_limbs()[0]
    }

    /// The position of the transaction in its block; `null` while pending.
    pub async fn index(&self) -> Option<u64> {
        self.transaction
            .transaction_index
            .map(|index| index.as_limbs()[0])
    }

    pub async fn value(&self) -> BigInt {
        self.transaction.value.into()
    }

    pub async fn gas(&self) -> BigInt {
        self.transaction.gas.into()
    }

    pub async fn gas_price(&self) -> Option<BigInt> {
        self.transaction.gas_price.map(Into::into)
    }

    pub async fn input(&self) -> Bytes {
        self.transaction.input.clone().into()
    }

    pub async fn block(&self, ctx: &Context<'_>) -> Result<Option<EthereumBlock>> {
        let Some(hash) = self.transaction.block_hash else {
            return Ok(None);
        };

        let key = EntityKey::block(self.network.clone(), hash.to_string());
        let block = loaders(ctx)?.block().load(key).await?;

        Ok(block.map(|block| EthereumBlock::new(self.network.clone(), block)))
    }

    pub async fn from(&self, ctx: &Context<'_>) -> Result<Option<EthereumAddress>> {
        let key = EntityKey::address(self.network.clone(), self.transaction.from.to_string());
        let from = loaders(ctx)?.address().load(key).await?;

        Ok(from.map(|info| EthereumAddress::new(self.network.clone(), info)))
    }

    /// The receiver of the transaction; `null` for contract creations.
    pub async fn to(&self, ctx: &Context<'_>) -> Result<Option<EthereumAddress>> {
        let Some(to) = self.transaction.to else {
            return Ok(None);
        };

        let key = EntityKey::address(self.network.clone(), to.to_string());
        let to = loaders(ctx)?.address().load(key).await?;

        Ok(to.map(|info| EthereumAddress::new(self.network.clone(), info)))
    }

    /// The logs emitted by the transaction; empty while pending.
    pub async fn logs(&self, ctx: &Context<'_>) -> Result<Vec<EthereumLog>> {
        let key = EntityKey::transaction_logs(self.network.clone(), self.transaction.hash.to_string());
        let logs = loaders(ctx)?.transaction_logs().load(key).await?;

        let logs = logs
            .map(|logs| logs.logs.iter().cloned().map(Into::into).collect())
            .unwrap_or_default();

        Ok(logs)
    }
}
