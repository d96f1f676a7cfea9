use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("invalid contract ABI: {0}")]
    InvalidAbi(#[source] serde_json::Error),

    #[error("invalid contract address '{0}'")]
    InvalidAddress(String),
}
