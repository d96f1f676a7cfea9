use std::collections::HashMap;

use alloy_dyn_abi::DynSolValue;
use alloy_dyn_abi::FunctionExt;
use alloy_dyn_abi::JsonAbiExt;
use alloy_dyn_abi::Specifier;
use alloy_json_abi::Function;
use alloy_json_abi::JsonAbi;
use anyhow::{anyhow, Context};

use crate::ContractError;

/// The callable methods of a contract, built once from its ABI.
///
/// A method can be referred to by name (`balanceOf`), by full signature
/// (`balanceOf(address)`) or by selector (`0x70a08231`). Overloaded names
/// resolve to the first overload in ABI order.
#[derive(Clone, Debug, Default)]
pub struct ContractInterface {
    functions: Vec<Function>,
    lookup: HashMap<String, usize>,
}

impl ContractInterface {
    pub fn from_abi(abi: &JsonAbi) -> Self {
        let mut functions = Vec::new();
        let mut lookup = HashMap::new();

        for function in abi.functions() {
            let index = functions.len();

            lookup.insert(function.signature(), index);
            lookup.insert(function.selector().to_string(), index);
            lookup.entry(function.name.clone()).or_insert(index);

            functions.push(function.clone());
        }

        Self { functions, lookup }
    }

    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let abi: JsonAbi = serde_json::from_str(json).map_err(ContractError::InvalidAbi)?;

        Ok(Self::from_abi(&abi))
    }

    pub fn function(&self, method: &str) -> Option<&Function> {
        let index = match self.lookup.get(method) {
            Some(index) => *index,
            None if method.starts_with("0x") => *self.lookup.get(&method.to_ascii_lowercase())?,
            None => return None,
        };

        self.functions.get(index)
    }

    pub fn contains(&self, method: &str) -> bool {
        self.function(method).is_some()
    }

    /// Returns the full signatures of all methods.
    pub fn signatures(&self) -> impl Iterator<Item = String> + '_ {
        self.functions.iter().map(Function::signature)
    }
}

/// Converts string arguments to the parameter types of the function
/// and returns the call data, selector included.
pub(crate) fn encode_input(function: &Function, args: &[String]) -> anyhow::Result<Vec<u8>> {
    if function.inputs.len() != args.len() {
        return Err(anyhow!(
            "'{}' expects {} arguments, got {}",
            function.signature(),
            function.inputs.len(),
            args.len()
        ));
    }

    let values = function
        .inputs
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let ty = param
                .resolve()
                .with_context(|| format!("unsupported parameter type '{}'", param.ty))?;

            ty.coerce_str(arg)
                .with_context(|| format!("'{arg}' is not a valid '{}'", param.ty))
        })
        .collect::<anyhow::Result<Vec<DynSolValue>>>()?;

    Ok(function.abi_encode_input(&values)?)
}

pub(crate) fn decode_output(function: &Function, data: &[u8]) -> anyhow::Result<Vec<DynSolValue>> {
    Ok(function.abi_decode_output(data, true)?)
}
