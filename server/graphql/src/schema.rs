use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Request, Schema};
use chainql_chain_ethereum::LoaderFactory;
use chainql_contracts::token::token_interface;
use chainql_contracts::ContractCallClient;
use chainql_contracts::SafeInvoker;
use slog::Logger;

use crate::resolvers::QueryRoot;

pub type ChainQlSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema() -> ChainQlSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(Arc::new(token_interface()))
        .finish()
}

/// Attaches the data that lives for one request: a fresh loader registry,
/// a contract invoker and the request logger.
pub fn scoped_request(
    request: Request,
    loader_factory: &LoaderFactory,
    call_client: &Arc<dyn ContractCallClient>,
    logger: &Logger,
) -> Request {
    let registry = loader_factory.registry_with_logger(logger.clone());
    let invoker = SafeInvoker::new(call_client.clone(), logger.clone());

    request.data(registry).data(invoker).data(logger.clone())
}
