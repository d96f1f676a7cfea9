//! This module exposes Ethereum entities over GraphQL.
//!
//! Every request gets its own loader registry, so entities are batched and
//! cached within a request and never shared between requests.

mod entities;
mod error;
mod handlers;
mod resolvers;
mod schema;
mod server;

pub use self::error::ServerError;
pub use self::schema::{build_schema, scoped_request, ChainQlSchema};
pub use self::server::{ChainQlServer, ChainQlServerManager};
