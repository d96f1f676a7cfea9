use async_graphql::Context;
use async_graphql::Object;
use async_graphql::Result;
use chainql_contracts::ContractHandle;
use chainql_primitives::EntityKey;
use chainql_primitives::NetworkId;

use crate::entities::EthereumAddress;
use crate::entities::EthereumBlock;
use crate::entities::EthereumTokenContract;
use crate::entities::EthereumTransaction;
use crate::resolvers::context::{loaders, token_interface};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Returns a block by its hash, or `null` if the network does not know it.
    pub async fn block(
        &self,
        ctx: &Context<'_>,
        network: String,
        hash: String,
    ) -> Result<Option<EthereumBlock>> {
        let network = NetworkId::new(network);
        let block = loaders(ctx)?
            .block()
            .load(EntityKey::block(network.clone(), hash))
            .await?;

        Ok(block.map(|block| EthereumBlock::new(network, block)))
    }

    /// Returns a transaction by its hash, or `null` if the network does not know it.
    pub async fn transaction(
        &self,
        ctx: &Context<'_>,
        network: String,
        hash: String,
    ) -> Result<Option<EthereumTransaction>> {
        let network = NetworkId::new(network);
        let transaction = loaders(ctx)?
            .transaction()
            .load(EntityKey::transaction(network.clone(), hash))
            .await?;

        Ok(transaction.map(|transaction| EthereumTransaction::new(network, transaction)))
    }

    /// Returns the state of an account at the latest block.
    pub async fn address(
        &self,
        ctx: &Context<'_>,
        network: String,
        address: String,
    ) -> Result<Option<EthereumAddress>> {
        let network = NetworkId::new(network);
        let info = loaders(ctx)?
            .address()
            .load(EntityKey::address(network.clone(), address))
            .await?;

        Ok(info.map(|info| EthereumAddress::new(network, info)))
    }

    /// Reads an address as a token contract.
    pub async fn token_contract(
        &self,
        ctx: &Context<'_>,
        network: String,
        address: String,
    ) -> Result<EthereumTokenContract> {
        let interface = token_interface(ctx)?;
        let contract = ContractHandle::parse(NetworkId::new(network), &address, interface)?;

        Ok(EthereumTokenContract::new(contract))
    }
}
