use std::collections::HashMap;
use std::time::Duration;

use anyhow::anyhow;
use chainql_primitives::BoxedFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use slog::{debug, Logger};
use thiserror::Error;

use crate::ChainError;

// Returned by nodes that throttle clients.
const LIMIT_EXCEEDED: i64 = -32005;

// Returned by `eth_call` when the execution reverted.
const EXECUTION_REVERTED: i64 = 3;

/// The result of one call in a JSON-RPC batch; `None` means the node answered `null`.
pub type RpcResult = Result<Option<Value>, RpcError>;

/// One JSON-RPC method invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcCall {
    method: &'static str,
    params: Value,
}

impl RpcCall {
    pub fn new(method: &'static str, params: Value) -> Self {
        Self { method, params }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn params(&self) -> &Value {
        &self.params
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RpcError {
    #[error("node returned error {code}: {message}")]
    Node {
        code: i64,
        message: String,
        data: Option<String>,
    },

    #[error("node did not answer request {0} of the batch")]
    MissingResponse(usize),
}

impl RpcError {
    /// Returns true if the same call may succeed when repeated later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Node { code, .. } => *code == LIMIT_EXCEEDED,
            Self::MissingResponse(_) => true,
        }
    }

    /// Returns true if the error reports a reverted contract execution.
    pub fn is_revert(&self) -> bool {
        match self {
            Self::Node { code, message, .. } => {
                *code == EXECUTION_REVERTED || message.contains("revert")
            }
            Self::MissingResponse(_) => false,
        }
    }
}

/// Sends batches of JSON-RPC calls to one node.
///
/// The returned vector has one result per call, in the order of the calls.
/// An `Err` means the batch as a whole failed, for example on a network error.
pub trait JsonRpcTransport: Send + Sync + 'static {
    fn batch(&self, calls: Vec<RpcCall>) -> BoxedFuture<Vec<RpcResult>, anyhow::Error>;
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ResponseError>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl From<ResponseError> for RpcError {
    fn from(err: ResponseError) -> Self {
        let ResponseError {
            code,
            message,
            data,
        } = err;

        let data = data.map(|data| match data {
            Value::String(data) => data,
            data => data.to_string(),
        });

        Self::Node {
            code,
            message,
            data,
        }
    }
}

/// Talks JSON-RPC 2.0 over HTTP.
pub struct HttpTransport {
    url: Url,
    client: reqwest::Client,
    logger: Logger,
}

impl HttpTransport {
    pub fn new(url: Url, timeout: Duration, logger: Logger) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ChainError::HttpClient)?;

        let logger = logger.new(slog::o!("url" => url.to_string()));

        Ok(Self {
            url,
            client,
            logger,
        })
    }
}

impl JsonRpcTransport for HttpTransport {
    fn batch(&self, calls: Vec<RpcCall>) -> BoxedFuture<Vec<RpcResult>, anyhow::Error> {
        let client = self.client.clone();
        let url = self.url.clone();
        let logger = self.logger.clone();

        Box::pin(async move {
            if calls.is_empty() {
                return Ok(Vec::new());
            }

            let expected = calls.len();
            let body = serde_json::to_vec(&request_body(&calls))?;

            debug!(logger, "Sending JSON-RPC batch"; "calls" => expected);

            let response = client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?
                .error_for_status()?;

            let bytes = response.bytes().await?;
            let body: Value = serde_json::from_slice(&bytes)?;

            parse_batch_response(body, expected)
        })
    }
}

fn request_body(calls: &[RpcCall]) -> Value {
    let requests = calls
        .iter()
        .enumerate()
        .map(|(id, call)| {
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": call.method,
                "params": call.params,
            })
        })
        .collect();

    Value::Array(requests)
}

// Nodes may answer batch members in any order; the ids put them back in place.
// A single object instead of an array means the whole batch was rejected.
fn parse_batch_response(body: Value, expected: usize) -> anyhow::Result<Vec<RpcResult>> {
    let responses = match body {
        Value::Array(responses) => responses,
        Value::Object(_) => {
            let response: Response = serde_json::from_value(body)?;

            return Err(match response.error {
                Some(err) => anyhow!(RpcError::from(err)),
                None => anyhow!("node answered a batch with a single response"),
            });
        }
        body => return Err(anyhow!("unexpected JSON-RPC response: {body}")),
    };

    let mut by_id = HashMap::with_capacity(responses.len());

    for response in responses {
        let response: Response = serde_json::from_value(response)?;

        if let Some(id) = response.id {
            by_id.insert(id, response);
        }
    }

    let results = (0..expected)
        .map(|id| match by_id.remove(&(id as u64)) {
            Some(Response {
                error: Some(err), ..
            }) => Err(err.into()),
            Some(Response { result, .. }) => Ok(result.filter(|result| !result.is_null())),
            None => Err(RpcError::MissingResponse(id)),
        })
        .collect();

    Ok(results)
}
