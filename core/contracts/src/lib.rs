//! This module reads contract state on a best-effort basis.
//!
//! A contract is described by an explicit method table built from its ABI.
//! Reads go through [SafeInvoker], which never fails: unknown methods,
//! reverted calls, bad return data and transport errors all become `None`,
//! while the cause is kept for logging.

mod client;
mod error;
mod handle;
mod interface;
mod safe_call;
mod value;

pub mod token;

pub use self::client::{CallError, ContractCallClient};
pub use self::error::ContractError;
pub use self::handle::ContractHandle;
pub use self::interface::ContractInterface;
pub use self::safe_call::{CallFailure, ContractMethodResult, SafeInvoker};
pub use self::value::ContractValue;

#[cfg(test)]
mod test_utils;
