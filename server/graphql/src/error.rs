use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind the HTTP listener: {0}")]
    Bind(#[source] std::io::Error),
}
