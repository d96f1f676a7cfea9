use std::time::Duration;

use chainql_chain_ethereum::NetworkEndpoint;
use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[clap(
    name = "chainql-node",
    about = "GraphQL over Ethereum JSON-RPC nodes",
    author = "chainql developers",
    version
)]
pub struct Opt {
    #[clap(
        long,
        default_value = "8000",
        value_name = "PORT",
        env = "CHAINQL_HTTP_PORT",
        help = "Port for the GraphQL HTTP server"
    )]
    pub http_port: u16,

    #[clap(
        long = "ethereum-rpc",
        value_name = "NETWORK:URL",
        env = "ETHEREUM_RPC",
        value_delimiter = ',',
        required = true,
        help = "Ethereum network name (e.g. 'mainnet') and JSON-RPC URL, separated by a ':'"
    )]
    pub ethereum_rpc: Vec<NetworkEndpoint>,

    #[clap(
        long,
        default_value = "1",
        value_name = "MILLISECONDS",
        env = "CHAINQL_BATCH_DELAY_MS",
        help = "How long a loader collects keys before it sends them to the node"
    )]
    pub batch_delay_ms: u64,

    #[clap(
        long,
        value_name = "KEYS",
        env = "CHAINQL_MAX_BATCH_SIZE",
        help = "Split loader windows into fetches of at most this many keys (unlimited by default)"
    )]
    pub max_batch_size: Option<usize>,

    #[clap(
        long,
        default_value = "30",
        value_name = "SECONDS",
        env = "CHAINQL_RPC_TIMEOUT",
        help = "Timeout for JSON-RPC requests"
    )]
    pub rpc_timeout_secs: u64,

    #[clap(long, help = "Enable debug logging")]
    pub debug: bool,
}

impl Opt {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}
