use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;
use alloy_primitives::Bytes;
use alloy_primitives::I256;
use alloy_primitives::U256;
use serde_json::Value;

/// A decoded value returned by a contract method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractValue {
    Bool(bool),
    Int(I256),
    Uint(U256),
    Address(Address),
    Bytes(Bytes),
    String(String),
    List(Vec<ContractValue>),
}

impl ContractValue {
    /// Collapses the outputs of a method into one value.
    ///
    /// Methods with a single output return that output; others return a list.
    pub fn from_outputs(outputs: Vec<DynSolValue>) -> Self {
        let mut outputs: Vec<Self> = outputs.into_iter().map(Into::into).collect();

        if outputs.len() == 1 {
            if let Some(value) = outputs.pop() {
                return value;
            }
        }

        Self::List(outputs)
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a `u32` if it is an unsigned integer that fits.
    pub fn as_u32(&self) -> Option<u32> {
        let value = self.as_uint()?;
        let limbs = value.as_limbs();

        if limbs[1..].iter().any(|limb| *limb != 0) {
            return None;
        }

        u32::try_from(limbs[0]).ok()
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the value to JSON.
    ///
    /// Integers become decimal strings, because they rarely fit into a JSON number.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(value) => Value::Bool(*value),
            Self::Int(value) => Value::String(value.to_string()),
            Self::Uint(value) => Value::String(value.to_string()),
            Self::Address(address) => Value::String(address.to_checksum(None)),
            Self::Bytes(bytes) => Value::String(bytes.to_string()),
            Self::String(value) => Value::String(value.clone()),
            Self::List(values) => Value::Array(values.iter().map(Self::to_json).collect()),
        }
    }
}

impl From<DynSolValue> for ContractValue {
    fn from(value: DynSolValue) -> Self {
        match value {
            DynSolValue::Bool(value) => Self::Bool(value),
            DynSolValue::Int(value, _) => Self::Int(value),
            DynSolValue::Uint(value, _) => Self::Uint(value),
            DynSolValue::Address(address) => Self::Address(address),
            DynSolValue::FixedBytes(word, size) => {
                Self::Bytes(Bytes::copy_from_slice(&word[..size.min(32)]))
            }
            DynSolValue::Bytes(bytes) => Self::Bytes(bytes.into()),
            DynSolValue::String(value) => Self::String(value),
            DynSolValue::Array(values)
            | DynSolValue::FixedArray(values)
            | DynSolValue::Tuple(values) => Self::List(values.into_iter().map(Into::into).collect()),
            other => Self::Bytes(other.abi_encode().into()),
        }
    }
}
