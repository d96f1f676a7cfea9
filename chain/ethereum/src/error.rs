use chainql_primitives::NetworkId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("invalid network endpoint '{0}', expected NAME:URL")]
    InvalidEndpoint(String),

    #[error("network '{0}' is configured more than once")]
    DuplicateNetwork(NetworkId),

    #[error("failed to build the HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
