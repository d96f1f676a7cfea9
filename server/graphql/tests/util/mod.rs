pub mod node;

use std::sync::Arc;
use std::time::Duration;

use async_graphql::Request;
use chainql_chain_ethereum::EthCallClient;
use chainql_chain_ethereum::LoaderFactory;
use chainql_chain_ethereum::Networks;
use chainql_contracts::ContractCallClient;
use chainql_loaders::LoaderConfig;
use chainql_server::{build_schema, scoped_request, ChainQlSchema};
use serde_json::Value;
use slog::Logger;

use self::node::FakeNode;

pub struct TestEnv {
    pub node: FakeNode,
    pub schema: ChainQlSchema,
    pub loader_factory: LoaderFactory,
    pub call_client: Arc<dyn ContractCallClient>,
    pub logger: Logger,
}

impl TestEnv {
    pub fn new(node: FakeNode) -> Self {
        let networks = Networks::new()
            .with_network("mainnet".into(), Arc::new(node.clone()))
            .unwrap();

        let logger = Logger::root(slog::Discard, slog::o!());

        let config = LoaderConfig::default().with_batch_delay(Duration::from_millis(5));
        let loader_factory = LoaderFactory::new(networks.clone(), config, logger.clone());

        Self {
            node,
            schema: build_schema(),
            loader_factory,
            call_client: Arc::new(EthCallClient::new(networks)),
            logger,
        }
    }

    /// Runs a query as one request and returns its data and error messages.
    pub async fn query(&self, query: &str) -> (Value, Vec<String>) {
        let request = scoped_request(
            Request::new(query),
            &self.loader_factory,
            &self.call_client,
            &self.logger,
        );

        let response = self.schema.execute(request).await;

        let errors = response
            .errors
            .iter()
            .map(|err| err.message.clone())
            .collect();

        (response.data.into_json().unwrap(), errors)
    }
}

/// Encodes an integer as one ABI word, without the `0x` prefix.
pub fn word(value: u128) -> String {
    format!("{value:064x}")
}

/// Encodes a single string return value.
pub fn abi_string(value: &str) -> String {
    let mut data: String = value.bytes().map(|byte| format!("{byte:02x}")).collect();

    while data.len() % 64 != 0 || data.is_empty() {
        data.push('0');
    }

    format!("0x{}{}{}", word(32), word(value.len() as u128), data)
}

pub fn abi_uint(value: u128) -> String {
    format!("0x{}", word(value))
}

pub fn abi_address(address: &str) -> String {
    format!("0x{:0>64}", address.trim_start_matches("0x"))
}
