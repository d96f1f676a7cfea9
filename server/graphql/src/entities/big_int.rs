use alloy_primitives::U256;
use alloy_primitives::U64;
use async_graphql::InputValueError;
use async_graphql::InputValueResult;
use async_graphql::Scalar;
use async_graphql::ScalarType;
use async_graphql::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigInt(pub U256);

#[Scalar]
/// Represents an unsigned 256-bit integer as a decimal string.
impl ScalarType for BigInt {
    fn parse(value: Value) -> InputValueResult<Self> {
        let Value::String(value) = value else {
            return Err(InputValueError::expected_type(value));
        };

        let value = value
            .parse::<U256>()
            .map_err(|_| InputValueError::custom(format!("'{value}' is not an unsigned integer")))?;

        Ok(BigInt(value))
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl From<U256> for BigInt {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<U64> for BigInt {
    fn from(value: U64) -> Self {
        Self(U256::from(value.as_limbs()[0]))
    }
}
