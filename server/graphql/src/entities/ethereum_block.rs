use std::sync::Arc;

use async_graphql::Context;
use async_graphql::Object;
use async_graphql::Result;
use chainql_chain_ethereum::Block;
use chainql_primitives::EntityKey;
use chainql_primitives::NetworkId;

use crate::entities::BigInt;
use crate::entities::Bytes;
use crate::entities::EthereumAddress;
use crate::entities::EthereumTransaction;
use crate::resolvers::context::{list_items, loaders};

#[derive(Clone, Debug)]
pub struct EthereumBlock {
    pub network: NetworkId,
    pub block: Arc<Block>,
}

impl EthereumBlock {
    pub fn new(network: NetworkId, block: Arc<Block>) -> Self {
        Self { network, block }
    }
}

#[Object]
/// A block on an Ethereum network.
impl EthereumBlock {
    pub async fn network(&self) -> &str {
        self.network.as_str()
    }

    pub async fn hash(&self) -> String {
        self.block.hash.to_string()
    }

    pub async fn number(&self) -> u64 {
        self.block.number.as_limbs()[0]
    }

    /// The block timestamp in seconds since the Unix epoch.
    pub async fn timestamp(&self) -> u64 {
        self.block.timestamp.as_limbs()[0]
    }

    pub async fn gas_limit(&self) -> BigInt {
        self.block.gas_limit.into()
    }

    pub async fn gas_used(&self) -> BigInt {
        self.block.gas_used.into()
    }

    pub async fn difficulty(&self) -> BigInt {
        self.block.difficulty.into()
    }

    pub async fn size(&self) -> Option<u64> {
        self.block.size.map(|size| size.as_limbs()[0])
    }

    pub async fn extra_data(&self) -> Bytes {
        self.block.extra_data.clone().into()
    }

    pub async fn parent(&self, ctx: &Context<'_>) -> Result<Option<EthereumBlock>> {
        let key = EntityKey::block(self.network.clone(), self.block.parent_hash.to_string());
        let parent = loaders(ctx)?.block().load(key).await?;

        Ok(parent.map(|block| Self::new(self.network.clone(), block)))
    }

    pub async fn miner(&self, ctx: &Context<'_>) -> Result<Option<EthereumAddress>> {
        let key = EntityKey::address(self.network.clone(), self.block.miner.to_string());
        let miner = loaders(ctx)?.address().load(key).await?;

        Ok(miner.map(|info| EthereumAddress::new(self.network.clone(), info)))
    }

    pub async fn transactions(&self, ctx: &Context<'_>) -> Result<Vec<Option<EthereumTransaction>>> {
        let keys = self
            .block
            .transactions
            .iter()
            .map(|hash| EntityKey::transaction(self.network.clone(), hash.to_string()));

        let results = loaders(ctx)?.transaction().load_many(keys).await;

        Ok(list_items(ctx, results, |transaction| {
            EthereumTransaction::new(self.network.clone(), transaction)
        }))
    }

    /// The number of transactions in this block.
    ///
    /// Counted for the block's own hash, not for its parent.
    pub async fn transaction_count(&self, ctx: &Context<'_>) -> Result<Option<u64>> {
        let key =
            EntityKey::block_transaction_count(self.network.clone(), self.block.hash.to_string());
        let count = loaders(ctx)?.block_transaction_count().load(key).await?;

        Ok(count.map(|count| count.count.as_limbs()[0]))
    }

    pub async fn uncles(&self, ctx: &Context<'_>) -> Result<Vec<Option<EthereumBlock>>> {
        let keys = self
            .block
            .uncles
            .iter()
            .map(|hash| EntityKey::block(self.network.clone(), hash.to_string()));

        let results = loaders(ctx)?.block().load_many(keys).await;

        Ok(list_items(ctx, results, |block| {
            Self::new(self.network.clone(), block)
        }))
    }
}
