//! Helpers for ERC-20 and ERC-721 style token contracts.

use alloy_primitives::U256;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;

use crate::ContractHandle;
use crate::ContractInterface;
use crate::ContractValue;
use crate::SafeInvoker;

/// The read methods shared by common token standards.
pub const TOKEN_ABI: &str = r#"[
    {
        "type": "function",
        "name": "name",
        "inputs": [],
        "outputs": [{ "name": "", "type": "string" }],
        "stateMutability": "view"
    },
    {
        "type": "function",
        "name": "symbol",
        "inputs": [],
        "outputs": [{ "name": "", "type": "string" }],
        "stateMutability": "view"
    },
    {
        "type": "function",
        "name": "decimals",
        "inputs": [],
        "outputs": [{ "name": "", "type": "uint8" }],
        "stateMutability": "view"
    },
    {
        "type": "function",
        "name": "totalSupply",
        "inputs": [],
        "outputs": [{ "name": "", "type": "uint256" }],
        "stateMutability": "view"
    },
    {
        "type": "function",
        "name": "balanceOf",
        "inputs": [{ "name": "owner", "type": "address" }],
        "outputs": [{ "name": "", "type": "uint256" }],
        "stateMutability": "view"
    },
    {
        "type": "function",
        "name": "allowance",
        "inputs": [
            { "name": "owner", "type": "address" },
            { "name": "spender", "type": "address" }
        ],
        "outputs": [{ "name": "", "type": "uint256" }],
        "stateMutability": "view"
    },
    {
        "type": "function",
        "name": "ownerOf",
        "inputs": [{ "name": "tokenId", "type": "uint256" }],
        "outputs": [{ "name": "", "type": "address" }],
        "stateMutability": "view"
    }
]"#;

pub fn token_interface() -> ContractInterface {
    ContractInterface::from_json(TOKEN_ABI).unwrap_or_default()
}

/// Converts a raw token amount to whole units.
///
/// Missing or zero decimals leave the amount as is.
pub fn scale_balance(raw: U256, decimals: Option<u32>) -> BigDecimal {
    let raw = BigInt::from_bytes_be(Sign::Plus, &raw.to_be_bytes::<32>());

    let decimals = match decimals {
        Some(decimals) if decimals > 0 => decimals,
        _ => return BigDecimal::from(raw),
    };

    let scaled = BigDecimal::new(raw, i64::from(decimals)).normalized();

    let (_, scale) = scaled.as_bigint_and_exponent();

    if scale < 0 {
        scaled.with_scale(0)
    } else {
        scaled
    }
}

/// Returns the balance of `owner` in whole token units.
///
/// `balanceOf` and `decimals` are read independently; a token without
/// `decimals` reports the raw amount.
pub async fn balance(
    invoker: &SafeInvoker,
    contract: &ContractHandle,
    owner: &str,
) -> Option<BigDecimal> {
    let owner = [owner.to_owned()];

    let (raw, decimals) = futures::join!(
        invoker.call_method_safe(contract, "balanceOf", &owner),
        invoker.call_method_safe(contract, "decimals", &[]),
    );

    let raw = raw.as_ref().and_then(ContractValue::as_uint)?;
    let decimals = decimals.as_ref().and_then(ContractValue::as_u32);

    Some(scale_balance(raw, decimals))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::Address;
    use chainql_primitives::NetworkId;
    use slog::Logger;

    use super::*;
    use crate::test_utils::client::{encode_output, selector, TestCallClient};
    use crate::CallError;

    const DECIMALS: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
    const OWNER: &str = "0x0000000000000000000000000000000000000001";

    fn contract() -> ContractHandle {
        ContractHandle::new(
            NetworkId::new("mainnet"),
            Address::repeat_byte(0x22),
            Arc::new(token_interface()),
        )
    }

    fn invoker(client: TestCallClient) -> SafeInvoker {
        SafeInvoker::new(Arc::new(client), Logger::root(slog::Discard, slog::o!()))
    }

    #[test]
    fn token_abi_is_valid() {
        let interface = token_interface();

        assert_eq!(interface.signatures().count(), 7);
        assert!(interface.contains("ownerOf(uint256)"));
    }

    #[test]
    fn balances_are_scaled_exactly() {
        let raw = U256::from(1_500_000_000_000_000_000u128);

        assert_eq!(
            scale_balance(raw, Some(18)),
            BigDecimal::from_str("1.5").unwrap()
        );
        assert_eq!(scale_balance(raw, Some(18)).to_string(), "1.5");
        assert_eq!(scale_balance(U256::from(10), Some(0)).to_string(), "10");
        assert_eq!(scale_balance(U256::from(1), Some(6)).to_string(), "0.000001");
    }

    #[test]
    fn whole_units_are_printed_without_exponent() {
        let raw = U256::from(20_000_000_000_000_000_000u128);

        assert_eq!(scale_balance(raw, Some(18)).to_string(), "20");
    }

    #[test]
    fn amounts_beyond_u128_are_kept() {
        let raw = U256::MAX;

        assert_eq!(scale_balance(raw, None).to_string(), U256::MAX.to_string());
    }

    #[tokio::test]
    async fn balance_combines_both_calls() {
        let invoker = invoker(TestCallClient::new(|_, _, call_data| {
            if selector(call_data) == DECIMALS {
                Ok(encode_output(DynSolValue::Uint(U256::from(18), 8)))
            } else {
                Ok(encode_output(DynSolValue::Uint(
                    U256::from(1_500_000_000_000_000_000u128),
                    256,
                )))
            }
        }));

        let balance = balance(&invoker, &contract(), OWNER).await;

        assert_eq!(balance, Some(BigDecimal::from_str("1.5").unwrap()));
    }

    #[tokio::test]
    async fn balance_without_decimals_is_raw() {
        let invoker = invoker(TestCallClient::new(|_, _, call_data| {
            if selector(call_data) == DECIMALS {
                Err(CallError::Reverted(String::new()))
            } else {
                Ok(encode_output(DynSolValue::Uint(
                    U256::from(1_500_000_000_000_000_000u128),
                    256,
                )))
            }
        }));

        let balance = balance(&invoker, &contract(), OWNER).await;

        assert_eq!(
            balance,
            Some(BigDecimal::from_str("1500000000000000000").unwrap())
        );
    }

    #[tokio::test]
    async fn failed_balance_of_is_none() {
        let invoker = invoker(TestCallClient::new(|_, _, call_data| {
            if selector(call_data) == DECIMALS {
                Ok(encode_output(DynSolValue::Uint(U256::from(18), 8)))
            } else {
                Err(CallError::EmptyResult)
            }
        }));

        assert_eq!(balance(&invoker, &contract(), OWNER).await, None);
    }
}
