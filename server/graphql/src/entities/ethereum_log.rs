use async_graphql::SimpleObject;
use chainql_chain_ethereum::Log;

use crate::entities::Bytes;

#[derive(Clone, Debug, SimpleObject)]
/// An event emitted by a contract during a transaction.
pub struct EthereumLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: Bytes,
    pub log_index: Option<u64>,
    pub removed: bool,
}

impl From<Log> for EthereumLog {
    fn from(log: Log) -> Self {
        let Log {
            address,
            topics,
            data,
            log_index,
            removed,
        } = log;

        Self {
            address: address.to_checksum(None),
            topics: topics.iter().map(ToString::to_string).collect(),
            data: data.into(),
            log_index: log_index.map(|index| index.as_limbs()[0]),
            removed,
        }
    }
}
