use std::sync::Arc;

use anyhow::Context;
use chainql_chain_ethereum::EthCallClient;
use chainql_chain_ethereum::HttpTransport;
use chainql_chain_ethereum::LoaderFactory;
use chainql_chain_ethereum::Networks;
use chainql_loaders::LoaderConfig;
use chainql_server::ChainQlServer;
use clap::Parser;
use slog::{crit, info, Logger};

mod logger;
mod opt;

use crate::opt::Opt;

#[tokio::main]
async fn main() {
    let opt = Opt::parse();
    let logger = logger::logger(opt.debug);

    if let Err(err) = run(opt, logger.clone()).await {
        crit!(logger, "chainql-node failed"; "error" => format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run(opt: Opt, logger: Logger) -> anyhow::Result<()> {
    let mut networks = Networks::new();

    for endpoint in &opt.ethereum_rpc {
        let network_logger = logger.new(slog::o!("network" => endpoint.network.to_string()));

        info!(
            network_logger,
            "Connecting to Ethereum node";
            "url" => endpoint.url.to_string()
        );

        let transport = HttpTransport::new(endpoint.url.clone(), opt.rpc_timeout(), network_logger)?;

        networks = networks.with_network(endpoint.network.clone(), Arc::new(transport))?;
    }

    anyhow::ensure!(!networks.is_empty(), "no Ethereum networks configured");

    let mut config = LoaderConfig::default().with_batch_delay(opt.batch_delay());

    if let Some(max_batch_size) = opt.max_batch_size {
        config = config.with_max_batch_size(max_batch_size);
    }

    let loader_factory = LoaderFactory::new(networks.clone(), config, logger.clone());
    let call_client = Arc::new(EthCallClient::new(networks));

    let server = ChainQlServer::new(loader_factory, call_client, logger.clone());
    let manager = server
        .start(opt.http_port)
        .await
        .context("failed to start the GraphQL server")?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for the shutdown signal")?;

    info!(logger, "Shutting down");
    manager.stop_server();

    Ok(())
}
