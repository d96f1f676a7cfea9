use async_graphql::InputValueError;
use async_graphql::InputValueResult;
use async_graphql::Scalar;
use async_graphql::ScalarType;
use async_graphql::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bytes(pub alloy_primitives::Bytes);

#[Scalar]
/// Represents binary data in `0x`-prefixed hex form.
impl ScalarType for Bytes {
    fn parse(value: Value) -> InputValueResult<Self> {
        let Value::String(value) = value else {
            return Err(InputValueError::expected_type(value));
        };

        let value = value
            .parse::<alloy_primitives::Bytes>()
            .map_err(|_| InputValueError::custom(format!("'{value}' is not valid hex")))?;

        Ok(Bytes(value))
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl From<alloy_primitives::Bytes> for Bytes {
    fn from(value: alloy_primitives::Bytes) -> Self {
        Self(value)
    }
}
