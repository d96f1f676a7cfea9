use std::sync::Arc;

use async_graphql::Context;
use async_graphql::Error;
use async_graphql::Result;
use chainql_chain_ethereum::LoaderRegistry;
use chainql_contracts::ContractInterface;
use chainql_contracts::SafeInvoker;
use chainql_loaders::LoaderError;

pub fn loaders<'a>(ctx: &Context<'a>) -> Result<&'a LoaderRegistry> {
    Ok(ctx.data::<LoaderRegistry>()?)
}

pub fn safe_invoker<'a>(ctx: &Context<'a>) -> Result<&'a SafeInvoker> {
    Ok(ctx.data::<SafeInvoker>()?)
}

pub fn token_interface(ctx: &Context<'_>) -> Result<Arc<ContractInterface>> {
    Ok(ctx.data::<Arc<ContractInterface>>()?.clone())
}

/// Turns the results of a batched lookup into list items.
///
/// Failed lookups become `null` items and are reported in the response errors,
/// so one bad entry does not hide the others.
pub fn list_items<V, T>(
    ctx: &Context<'_>,
    results: Vec<Result<Option<V>, LoaderError>>,
    mut wrap: impl FnMut(V) -> T,
) -> Vec<Option<T>> {
    results
        .into_iter()
        .map(|result| match result {
            Ok(value) => value.map(&mut wrap),
            Err(err) => {
                ctx.add_error(Error::new(err.to_string()).into_server_error(ctx.item.pos));
                None
            }
        })
        .collect()
}
