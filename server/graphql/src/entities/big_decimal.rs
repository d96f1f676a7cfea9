use std::str::FromStr;

use async_graphql::InputValueError;
use async_graphql::InputValueResult;
use async_graphql::Scalar;
use async_graphql::ScalarType;
use async_graphql::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigDecimal(pub bigdecimal::BigDecimal);

#[Scalar]
/// Represents an arbitrary-precision decimal number as a string.
impl ScalarType for BigDecimal {
    fn parse(value: Value) -> InputValueResult<Self> {
        let Value::String(value) = value else {
            return Err(InputValueError::expected_type(value));
        };

        let value = bigdecimal::BigDecimal::from_str(&value)
            .map_err(|_| InputValueError::custom(format!("'{value}' is not a decimal number")))?;

        Ok(BigDecimal(value))
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl From<bigdecimal::BigDecimal> for BigDecimal {
    fn from(value: bigdecimal::BigDecimal) -> Self {
        Self(value)
    }
}
