use std::sync::Arc;

use async_graphql::Context;
use async_graphql::Object;
use async_graphql::Result;
use chainql_chain_ethereum::AddressInfo;
use chainql_contracts::ContractHandle;
use chainql_primitives::NetworkId;

use crate::entities::BigInt;
use crate::entities::Bytes;
use crate::entities::EthereumTokenContract;
use crate::resolvers::context::token_interface;

#[derive(Clone, Debug)]
pub struct EthereumAddress {
    pub network: NetworkId,
    pub info: Arc<AddressInfo>,
}

impl EthereumAddress {
    pub fn new(network: NetworkId, info: Arc<AddressInfo>) -> Self {
        Self { network, info }
    }
}

#[Object]
/// An account on an Ethereum network, at the latest block.
impl EthereumAddress {
    pub async fn network(&self) -> &str {
        self.network.as_str()
    }

    /// The checksummed address.
    pub async fn address(&self) -> String {
        self.info.address.to_checksum(None)
    }

    /// The balance in wei.
    pub async fn balance(&self) -> BigInt {
        self.info.balance.into()
    }

    pub async fn transaction_count(&self) -> u64 {
        self.info.transaction_count.as_limbs()[0]
    }

    pub async fn code(&self) -> Bytes {
        self.info.code.clone().into()
    }

    pub async fn is_contract(&self) -> bool {
        self.info.is_contract()
    }

    /// Reads this address as a token contract. Fields the contract does not
    /// implement resolve to `null`.
    pub async fn token_contract(&self, ctx: &Context<'_>) -> Result<EthereumTokenContract> {
        let contract = ContractHandle::new(
            self.network.clone(),
            self.info.address,
            token_interface(ctx)?,
        );

        Ok(EthereumTokenContract::new(contract))
    }
}
