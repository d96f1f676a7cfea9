use async_graphql::Context;
use async_graphql::Object;
use async_graphql::Result;
use chainql_contracts::token;
use chainql_contracts::ContractHandle;
use chainql_contracts::ContractValue;
use chainql_primitives::EntityKey;

use crate::entities::BigDecimal;
use crate::entities::BigInt;
use crate::entities::EthereumAddress;
use crate::entities::EthereumContractMethod;
use crate::resolvers::context::{loaders, safe_invoker};

/// An ERC-20 or ERC-721 style token contract.
///
/// Every contract read is best-effort: a method that is missing, reverts or
/// cannot be reached resolves to `null`.
#[derive(Clone, Debug)]
pub struct EthereumTokenContract {
    pub contract: ContractHandle,
}

impl EthereumTokenContract {
    pub fn new(contract: ContractHandle) -> Self {
        Self { contract }
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        method: &str,
        args: &[String],
    ) -> Result<Option<ContractValue>> {
        let value = safe_invoker(ctx)?
            .call_method_safe(&self.contract, method, args)
            .await;

        Ok(value)
    }

    async fn read_uint(
        &self,
        ctx: &Context<'_>,
        method: &str,
        args: &[String],
    ) -> Result<Option<BigInt>> {
        let value = self.read(ctx, method, args).await?;

        Ok(value.as_ref().and_then(ContractValue::as_uint).map(Into::into))
    }

    async fn read_string(&self, ctx: &Context<'_>, method: &str) -> Result<Option<String>> {
        let value = self.read(ctx, method, &[]).await?;

        Ok(value.as_ref().and_then(ContractValue::as_str).map(ToOwned::to_owned))
    }
}

#[Object]
impl EthereumTokenContract {
    pub async fn network(&self) -> &str {
        self.contract.network().as_str()
    }

    pub async fn address(&self, ctx: &Context<'_>) -> Result<Option<EthereumAddress>> {
        let network = self.contract.network().clone();
        let key = EntityKey::address(network.clone(), self.contract.address().to_string());
        let info = loaders(ctx)?.address().load(key).await?;

        Ok(info.map(|info| EthereumAddress::new(network, info)))
    }

    /// Returns a method of the contract by name, signature or selector,
    /// or `null` if the contract does not have it. The method is not called.
    pub async fn method(&self, signature: String) -> Option<EthereumContractMethod> {
        if !self.contract.has_method(&signature) {
            return None;
        }

        Some(EthereumContractMethod {
            contract: self.contract.clone(),
            signature,
        })
    }

    pub async fn name(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        self.read_string(ctx, "name").await
    }

    pub async fn symbol(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        self.read_string(ctx, "symbol").await
    }

    pub async fn decimals(&self, ctx: &Context<'_>) -> Result<Option<u32>> {
        let value = self.read(ctx, "decimals", &[]).await?;

        Ok(value.as_ref().and_then(ContractValue::as_u32))
    }

    pub async fn total_supply(&self, ctx: &Context<'_>) -> Result<Option<BigInt>> {
        self.read_uint(ctx, "totalSupply", &[]).await
    }

    /// The owner of a non-fungible token.
    pub async fn owner(
        &self,
        ctx: &Context<'_>,
        token_id: String,
    ) -> Result<Option<EthereumAddress>> {
        let owner = self
            .read(ctx, "ownerOf", &[token_id])
            .await?
            .as_ref()
            .and_then(ContractValue::as_address);

        let Some(owner) = owner else {
            return Ok(None);
        };

        let network = self.contract.network().clone();
        let key = EntityKey::address(network.clone(), owner.to_string());
        let info = loaders(ctx)?.address().load(key).await?;

        Ok(info.map(|info| EthereumAddress::new(network, info)))
    }

    /// The balance of `owner` in whole tokens, or in base units if the
    /// contract does not report its decimals.
    pub async fn balance(&self, ctx: &Context<'_>, owner: String) -> Result<Option<BigDecimal>> {
        let balance = token::balance(safe_invoker(ctx)?, &self.contract, &owner).await;

        Ok(balance.map(Into::into))
    }

    /// The balance of `owner` in base units.
    pub async fn raw_balance(&self, ctx: &Context<'_>, owner: String) -> Result<Option<BigInt>> {
        self.read_uint(ctx, "balanceOf", &[owner]).await
    }

    pub async fn allowance(
        &self,
        ctx: &Context<'_>,
        owner: String,
        spender: String,
    ) -> Result<Option<BigInt>> {
        self.read_uint(ctx, "allowance", &[owner, spender]).await
    }
}
