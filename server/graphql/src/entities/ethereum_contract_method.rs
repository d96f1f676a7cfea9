use async_graphql::Context;
use async_graphql::Json;
use async_graphql::Object;
use async_graphql::Result;
use async_graphql::SimpleObject;
use chainql_contracts::ContractHandle;
use chainql_contracts::ContractMethodResult;
use serde_json::Value;

use crate::entities::CallFailure;
use crate::resolvers::context::safe_invoker;

/// A method of a contract, not called yet.
#[derive(Clone, Debug)]
pub struct EthereumContractMethod {
    pub contract: ContractHandle,
    pub signature: String,
}

#[derive(Clone, Debug, SimpleObject)]
/// Contains the outcome of a contract call.
pub struct ContractCallResult {
    pub success: bool,
    /// The decoded return value. Integers are encoded as decimal strings.
    pub value: Option<Json<Value>>,
    pub failure_reason: Option<CallFailure>,
}

impl From<ContractMethodResult> for ContractCallResult {
    fn from(result: ContractMethodResult) -> Self {
        let ContractMethodResult {
            success,
            raw,
            failure_reason,
        } = result;

        Self {
            success,
            value: raw.map(|raw| Json(raw.to_json())),
            failure_reason: failure_reason.map(Into::into),
        }
    }
}

#[Object]
impl EthereumContractMethod {
    pub async fn signature(&self) -> &str {
        &self.signature
    }

    /// Calls the method at the latest block.
    pub async fn call(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "The arguments of the call, in order.
                          Integers are given as decimal strings.")]
        args: Option<Vec<String>>,
    ) -> Result<ContractCallResult> {
        let args = args.unwrap_or_default();

        let result = safe_invoker(ctx)?
            .invoke(&self.contract, &self.signature, &args)
            .await;

        Ok(result.into())
    }
}
