use std::sync::Arc;

use chainql_primitives::EntityKey;
use slog::{debug, Logger};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::interface::{decode_output, encode_input};
use crate::CallError;
use crate::ContractCallClient;
use crate::ContractHandle;
use crate::ContractValue;

/// Lists the reasons a contract read can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CallFailure {
    UnknownMethod,
    InvalidArguments,
    UnknownNetwork,
    Transport,
    Reverted,
    EmptyResult,
    Decode,
}

/// The outcome of a contract read, with the cause of failure kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractMethodResult {
    pub success: bool,
    pub raw: Option<ContractValue>,
    pub failure_reason: Option<CallFailure>,
}

impl ContractMethodResult {
    fn succeeded(value: ContractValue) -> Self {
        Self {
            success: true,
            raw: Some(value),
            failure_reason: None,
        }
    }

    fn failed(reason: CallFailure) -> Self {
        Self {
            success: false,
            raw: None,
            failure_reason: Some(reason),
        }
    }

    pub fn into_value(self) -> Option<ContractValue> {
        self.raw
    }
}

#[derive(Debug, Error)]
enum InvokeError {
    #[error("method is not part of the contract interface")]
    UnknownMethod,

    #[error("invalid arguments: {0:#}")]
    InvalidArguments(anyhow::Error),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error("failed to decode the return data: {0:#}")]
    Decode(anyhow::Error),
}

impl InvokeError {
    fn reason(&self) -> CallFailure {
        match self {
            Self::UnknownMethod => CallFailure::UnknownMethod,
            Self::InvalidArguments(_) => CallFailure::InvalidArguments,
            Self::Call(CallError::UnknownNetwork(_)) => CallFailure::UnknownNetwork,
            Self::Call(CallError::Transport(_)) => CallFailure::Transport,
            Self::Call(CallError::Reverted(_)) => CallFailure::Reverted,
            Self::Call(CallError::Rpc(_)) => CallFailure::Reverted,
            Self::Call(CallError::EmptyResult) => CallFailure::EmptyResult,
            Self::Decode(_) => CallFailure::Decode,
        }
    }
}

/// Reads contract methods without ever failing the caller.
///
/// Holds no state besides the client, so it can be shared by all requests.
/// Results are not cached.
#[derive(Clone)]
pub struct SafeInvoker {
    client: Arc<dyn ContractCallClient>,
    logger: Logger,
}

impl SafeInvoker {
    pub fn new(client: Arc<dyn ContractCallClient>, logger: Logger) -> Self {
        Self { client, logger }
    }

    /// Returns the decoded result of a contract method, or `None` if the method
    /// is unknown or the call failed for any reason.
    pub async fn call_method_safe(
        &self,
        contract: &ContractHandle,
        method: &str,
        args: &[String],
    ) -> Option<ContractValue> {
        self.invoke(contract, method, args).await.into_value()
    }

    /// Like [SafeInvoker::call_method_safe], but keeps the failure reason.
    pub async fn invoke(
        &self,
        contract: &ContractHandle,
        method: &str,
        args: &[String],
    ) -> ContractMethodResult {
        match self.try_invoke(contract, method, args).await {
            Ok(value) => ContractMethodResult::succeeded(value),
            Err(err) => {
                let reason = err.reason();
                let call = EntityKey::contract_call(
                    contract.network().clone(),
                    contract.address().to_string(),
                    method,
                    args.to_vec(),
                );

                debug!(
                    self.logger,
                    "Contract call failed";
                    "network" => contract.network().as_str(),
                    "call" => ?call.identity(),
                    "reason" => reason.to_string(),
                    "error" => err.to_string()
                );

                ContractMethodResult::failed(reason)
            }
        }
    }

    async fn try_invoke(
        &self,
        contract: &ContractHandle,
        method: &str,
        args: &[String],
    ) -> Result<ContractValue, InvokeError> {
        // Unknown methods fail before anything is sent to the node.
        let function = contract
            .interface()
            .function(method)
            .ok_or(InvokeError::UnknownMethod)?;

        let call_data = encode_input(function, args).map_err(InvokeError::InvalidArguments)?;

        let output = self
            .client
            .read_method(contract.network(), contract.address(), call_data.into())
            .await?;

        let outputs = decode_output(function, &output).map_err(InvokeError::Decode)?;

        Ok(ContractValue::from_outputs(outputs))
    }
}

#[cfg(test)]
mod tests {
    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::Address;
    use alloy_primitives::Bytes;
    use alloy_primitives::U256;
    use anyhow::anyhow;
    use chainql_primitives::NetworkId;

    use super::*;
    use crate::test_utils::client::{encode_output, TestCallClient};
    use crate::token::TOKEN_ABI;
    use crate::ContractInterface;

    const OWNER: &str = "0x0000000000000000000000000000000000000001";

    fn logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn token(interface: &str) -> ContractHandle {
        ContractHandle::new(
            NetworkId::new("mainnet"),
            Address::repeat_byte(0x11),
            Arc::new(ContractInterface::from_json(interface).unwrap()),
        )
    }

    fn invoker(client: &Arc<TestCallClient>) -> SafeInvoker {
        SafeInvoker::new(client.clone(), logger())
    }

    #[tokio::test]
    async fn successful_calls_return_the_decoded_value() {
        let client = Arc::new(TestCallClient::new(|_, _, _| {
            Ok(encode_output(DynSolValue::String("Dai Stablecoin".to_owned())))
        }));

        let name = invoker(&client)
            .call_method_safe(&token(TOKEN_ABI), "name", &[])
            .await;

        assert_eq!(name, Some(ContractValue::String("Dai Stablecoin".to_owned())));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn unknown_methods_fail_without_a_call() {
        let client = Arc::new(TestCallClient::new(|_, _, _| Ok(Bytes::new())));

        let result = invoker(&client)
            .invoke(&token(TOKEN_ABI), "mint", &[])
            .await;

        assert_eq!(result.failure_reason, Some(CallFailure::UnknownMethod));
        assert!(!result.success);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_decimals_degrade_to_none() {
        let interface = r#"[{
            "type": "function",
            "name": "balanceOf",
            "inputs": [{ "name": "owner", "type": "address" }],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        }]"#;

        let client = Arc::new(TestCallClient::new(|_, _, _| {
            Ok(encode_output(DynSolValue::Uint(U256::from(1), 256)))
        }));

        let decimals = invoker(&client)
            .call_method_safe(&token(interface), "decimals", &[])
            .await;

        assert_eq!(decimals, None);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_arguments_fail_without_a_call() {
        let client = Arc::new(TestCallClient::new(|_, _, _| Ok(Bytes::new())));

        let result = invoker(&client)
            .invoke(&token(TOKEN_ABI), "balanceOf", &["nobody".to_owned()])
            .await;

        assert_eq!(result.failure_reason, Some(CallFailure::InvalidArguments));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn reverted_calls_degrade_to_none() {
        let client = Arc::new(TestCallClient::new(|_, _, _| {
            Err(CallError::Reverted("ERC721: invalid token ID".to_owned()))
        }));

        let result = invoker(&client)
            .invoke(&token(TOKEN_ABI), "ownerOf", &["42".to_owned()])
            .await;

        assert_eq!(result.failure_reason, Some(CallFailure::Reverted));
        assert_eq!(result.into_value(), None);
    }

    #[tokio::test]
    async fn transport_failures_degrade_to_none() {
        let client = Arc::new(TestCallClient::new(|_, _, _| {
            Err(CallError::Transport(anyhow!("connection refused")))
        }));

        let result = invoker(&client)
            .invoke(&token(TOKEN_ABI), "symbol", &[])
            .await;

        assert_eq!(result.failure_reason, Some(CallFailure::Transport));
    }

    #[tokio::test]
    async fn malformed_return_data_degrades_to_none() {
        let client = Arc::new(TestCallClient::new(|_, _, _| Ok(Bytes::new())));

        let result = invoker(&client)
            .invoke(&token(TOKEN_ABI), "decimals", &[])
            .await;

        assert_eq!(result.failure_reason, Some(CallFailure::Decode));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn arguments_reach_the_client() {
        let client = Arc::new(TestCallClient::new(|_, _, _| {
            Ok(encode_output(DynSolValue::Uint(U256::from(5), 256)))
        }));

        let balance = invoker(&client)
            .call_method_safe(&token(TOKEN_ABI), "balanceOf", &[OWNER.to_owned()])
            .await;

        assert_eq!(balance, Some(ContractValue::Uint(U256::from(5))));

        let calls = client.calls();
        let (address, call_data) = &calls[0];

        assert_eq!(*address, Address::repeat_byte(0x11));
        assert_eq!(&call_data[..4], &[0x70, 0xa0, 0x82, 0x31]);
    }
}
