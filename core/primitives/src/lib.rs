//! This module contains the types and traits shared by the loaders,
//! the contract layer and the chain clients.
//!
//! Nothing in here talks to the network; the traits only describe
//! the boundaries that other crates implement.

mod fetch;
mod key;
mod network;

pub use self::fetch::{BatchFetch, BoxedFuture, FetchError};
pub use self::key::{EntityKey, EntityKind, Identity};
pub use self::network::NetworkId;
