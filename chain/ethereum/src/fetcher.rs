use std::marker::PhantomData;
use std::sync::Arc;

use alloy_primitives::Address;
use alloy_primitives::B256;
use alloy_primitives::U256;
use alloy_primitives::U64;
use anyhow::{anyhow, Context};
use chainql_primitives::BatchFetch;
use chainql_primitives::BoxedFuture;
use chainql_primitives::EntityKey;
use chainql_primitives::FetchError;
use chainql_primitives::NetworkId;
use futures::future::join_all;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde_json::json;
use serde_json::Value;

use crate::AddressInfo;
use crate::Block;
use crate::BlockTransactionCount;
use crate::JsonRpcTransport;
use crate::Networks;
use crate::RpcCall;
use crate::RpcResult;
use crate::Transaction;
use crate::TransactionLogs;

/// Describes how an entity is fetched from a node by its hash or address.
pub trait Web3Entity: Send + Sync + Sized + 'static {
    /// Returns the calls that fetch the entity.
    fn calls(id: &str) -> Vec<RpcCall>;

    /// Builds the entity from the results of [Web3Entity::calls], given in the same order.
    ///
    /// Returns `None` if the node does not know the entity.
    fn from_responses(id: &str, responses: Vec<Option<Value>>) -> anyhow::Result<Option<Self>>;
}

impl Web3Entity for Block {
    fn calls(id: &str) -> Vec<RpcCall> {
        vec![RpcCall::new("eth_getBlockByHash", json!([id, false]))]
    }

    fn from_responses(_id: &str, responses: Vec<Option<Value>>) -> anyhow::Result<Option<Self>> {
        first(responses)
    }
}

impl Web3Entity for Transaction {
    fn calls(id: &str) -> Vec<RpcCall> {
        vec![RpcCall::new("eth_getTransactionByHash", json!([id]))]
    }

    fn from_responses(_id: &str, responses: Vec<Option<Value>>) -> anyhow::Result<Option<Self>> {
        first(responses)
    }
}

impl Web3Entity for AddressInfo {
    fn calls(id: &str) -> Vec<RpcCall> {
        vec![
            RpcCall::new("eth_getBalance", json!([id, "latest"])),
            RpcCall::new("eth_getTransactionCount", json!([id, "latest"])),
            RpcCall::new("eth_getCode", json!([id, "latest"])),
        ]
    }

    fn from_responses(id: &str, responses: Vec<Option<Value>>) -> anyhow::Result<Option<Self>> {
        let address = id
            .parse::<Address>()
            .with_context(|| format!("invalid address '{id}'"))?;

        let [balance, transaction_count, code]: [Option<Value>; 3] = responses
            .try_into()
            .map_err(|responses: Vec<_>| anyhow!("expected 3 results, got {}", responses.len()))?;

        let Some(balance) = balance else {
            return Ok(None);
        };

        Ok(Some(Self {
            address,
            balance: serde_json::from_value::<U256>(balance)?,
            transaction_count: transaction_count
                .map(serde_json::from_value)
                .transpose()?
                .unwrap_or_default(),
            code: code.map(serde_json::from_value).transpose()?.unwrap_or_default(),
        }))
    }
}

impl Web3Entity for BlockTransactionCount {
    fn calls(id: &str) -> Vec<RpcCall> {
        vec![RpcCall::new("eth_getBlockTransactionCountByHash", json!([id]))]
    }

    fn from_responses(id: &str, responses: Vec<Option<Value>>) -> anyhow::Result<Option<Self>> {
        let block_hash = id
            .parse::<B256>()
            .with_context(|| format!("invalid block hash '{id}'"))?;

        let count: Option<U64> = first(responses)?;

        Ok(count.map(|count| Self { block_hash, count }))
    }
}

impl Web3Entity for TransactionLogs {
    fn calls(id: &str) -> Vec<RpcCall> {
        vec![RpcCall::new("eth_getTransactionReceipt", json!([id]))]
    }

    fn from_responses(_id: &str, responses: Vec<Option<Value>>) -> anyhow::Result<Option<Self>> {
        first(responses)
    }
}

fn first<T: DeserializeOwned>(responses: Vec<Option<Value>>) -> anyhow::Result<Option<T>> {
    match responses.into_iter().next().flatten() {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Fetches entities of one type for a loader.
///
/// Keys are grouped by network and every network gets one JSON-RPC batch;
/// the batches run concurrently. A missing entity resolves to `None`.
pub struct Web3Fetcher<E> {
    networks: Networks,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Web3Fetcher<E> {
    pub fn new(networks: Networks) -> Self {
        Self {
            networks,
            _entity: PhantomData,
        }
    }
}

type Fetched<E> = Result<Option<Arc<E>>, FetchError>;

impl<E: Web3Entity> BatchFetch<EntityKey, Option<Arc<E>>> for Web3Fetcher<E> {
    fn fetch(&self, keys: Vec<EntityKey>) -> BoxedFuture<Vec<Fetched<E>>, anyhow::Error> {
        let networks = self.networks.clone();

        Box::pin(async move {
            let total = keys.len();

            let fetches = keys
                .into_iter()
                .enumerate()
                .into_group_map_by(|(_, key)| key.network().clone())
                .into_iter()
                .map(|(network, keys)| {
                    let transport = networks.transport(&network);
                    fetch_network::<E>(transport, network, keys)
                })
                .collect::<Vec<_>>();

            let mut results: Vec<Option<Fetched<E>>> =
                std::iter::repeat_with(|| None).take(total).collect();

            for (position, result) in join_all(fetches).await.into_iter().flatten() {
                results[position] = Some(result);
            }

            results
                .into_iter()
                .enumerate()
                .map(|(position, result)| {
                    result.ok_or_else(|| anyhow!("no result for key at position {position}"))
                })
                .collect()
        })
    }
}

async fn fetch_network<E: Web3Entity>(
    transport: Option<Arc<dyn JsonRpcTransport>>,
    network: NetworkId,
    keys: Vec<(usize, EntityKey)>,
) -> Vec<(usize, Fetched<E>)> {
    let Some(transport) = transport else {
        return keys
            .into_iter()
            .map(|(position, _)| {
                let err = anyhow!("network '{network}' is not configured");
                (position, Err(FetchError::Permanent(err)))
            })
            .collect();
    };

    let calls: Vec<Vec<RpcCall>> = keys.iter().map(|(_, key)| E::calls(key.id())).collect();
    let expected: usize = calls.iter().map(Vec::len).sum();

    let responses = match transport.batch(calls.iter().flatten().cloned().collect()).await {
        Ok(responses) if responses.len() == expected => responses,
        Ok(responses) => {
            let message = format!("node returned {} results for {expected} calls", responses.len());
            return transient(keys, &message);
        }
        Err(err) => return transient(keys, &format!("{err:#}")),
    };

    let mut responses = responses.into_iter();

    keys.into_iter()
        .zip(calls)
        .map(|((position, key), calls)| {
            let responses = responses.by_ref().take(calls.len()).collect();
            (position, decode::<E>(key.id(), responses))
        })
        .collect()
}

fn transient<E>(keys: Vec<(usize, EntityKey)>, message: &str) -> Vec<(usize, Fetched<E>)> {
    keys.into_iter()
        .map(|(position, _)| (position, Err(FetchError::Transient(anyhow!("{message}")))))
        .collect()
}

fn decode<E: Web3Entity>(id: &str, responses: Vec<RpcResult>) -> Fetched<E> {
    let responses = responses
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            if err.is_retryable() {
                FetchError::Transient(err.into())
            } else {
                FetchError::Permanent(err.into())
            }
        })?;

    E::from_responses(id, responses)
        .map(|entity| entity.map(Arc::new))
        .map_err(FetchError::Permanent)
}
