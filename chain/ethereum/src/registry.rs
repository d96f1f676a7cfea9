use std::sync::Arc;

use chainql_loaders::BatchLoader;
use chainql_loaders::LoaderConfig;
use chainql_primitives::EntityKey;
use slog::Logger;

use crate::AddressInfo;
use crate::Block;
use crate::BlockTransactionCount;
use crate::Networks;
use crate::Transaction;
use crate::TransactionLogs;
use crate::Web3Entity;
use crate::Web3Fetcher;

/// A loader of one entity type; `None` means the node does not know the entity.
pub type EntityLoader<E> = BatchLoader<EntityKey, Option<Arc<E>>>;

/// Creates a fresh [LoaderRegistry] for every request.
///
/// The fetchers are shared between all registries; caches are not.
#[derive(Clone)]
pub struct LoaderFactory {
    fetchers: Arc<Fetchers>,
    config: LoaderConfig,
    logger: Logger,
}

struct Fetchers {
    block: Arc<Web3Fetcher<Block>>,
    address: Arc<Web3Fetcher<AddressInfo>>,
    transaction: Arc<Web3Fetcher<Transaction>>,
    block_transaction_count: Arc<Web3Fetcher<BlockTransactionCount>>,
    transaction_logs: Arc<Web3Fetcher<TransactionLogs>>,
}

impl LoaderFactory {
    pub fn new(networks: Networks, config: LoaderConfig, logger: Logger) -> Self {
        let fetchers = Fetchers {
            block: Arc::new(Web3Fetcher::new(networks.clone())),
            address: Arc::new(Web3Fetcher::new(networks.clone())),
            transaction: Arc::new(Web3Fetcher::new(networks.clone())),
            block_transaction_count: Arc::new(Web3Fetcher::new(networks.clone())),
            transaction_logs: Arc::new(Web3Fetcher::new(networks)),
        };

        Self {
            fetchers: Arc::new(fetchers),
            config,
            logger,
        }
    }

    pub fn registry(&self) -> LoaderRegistry {
        self.registry_with_logger(self.logger.clone())
    }

    /// Creates a registry whose loaders log to the given logger,
    /// usually one that identifies the request.
    pub fn registry_with_logger(&self, logger: Logger) -> LoaderRegistry {
        let Fetchers {
            block,
            address,
            transaction,
            block_transaction_count,
            transaction_logs,
        } = self.fetchers.as_ref();

        LoaderRegistry {
            block: self.loader("block", block, &logger),
            address: self.loader("address", address, &logger),
            transaction: self.loader("transaction", transaction, &logger),
            block_transaction_count: self.loader(
                "block_transaction_count",
                block_transaction_count,
                &logger,
            ),
            transaction_logs: self.loader("transaction_logs", transaction_logs, &logger),
        }
    }

    fn loader<E: Web3Entity>(
        &self,
        name: &'static str,
        fetcher: &Arc<Web3Fetcher<E>>,
        logger: &Logger,
    ) -> EntityLoader<E> {
        BatchLoader::new(name, fetcher.clone(), self.config.clone(), logger.clone())
    }
}

/// The loaders of one request.
///
/// Dropping the registry drops every cached entity.
pub struct LoaderRegistry {
    block: EntityLoader<Block>,
    address: EntityLoader<AddressInfo>,
    transaction: EntityLoader<Transaction>,
    block_transaction_count: EntityLoader<BlockTransactionCount>,
    transaction_logs: EntityLoader<TransactionLogs>,
}

impl LoaderRegistry {
    pub fn block(&self) -> &EntityLoader<Block> {
        &self.block
    }

    pub fn address(&self) -> &EntityLoader<AddressInfo> {
        &self.address
    }

    pub fn transaction(&self) -> &EntityLoader<Transaction> {
        &self.transaction
    }

    pub fn block_transaction_count(&self) -> &EntityLoader<BlockTransactionCount> {
        &self.block_transaction_count
    }

    pub fn transaction_logs(&self) -> &EntityLoader<TransactionLogs> {
        &self.transaction_logs
    }
}
