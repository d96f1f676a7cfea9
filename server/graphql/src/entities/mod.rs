mod big_decimal;
mod big_int;
mod bytes;
mod call_failure;
mod ethereum_address;
mod ethereum_block;
mod ethereum_contract_method;
mod ethereum_log;
mod ethereum_token_contract;
mod ethereum_transaction;

pub use self::big_decimal::BigDecimal;
pub use self::big_int::BigInt;
pub use self::bytes::Bytes;
pub use self::call_failure::CallFailure;
pub use self::ethereum_address::EthereumAddress;
pub use self::ethereum_block::EthereumBlock;
pub use self::ethereum_contract_method::{ContractCallResult, EthereumContractMethod};
pub use self::ethereum_log::EthereumLog;
pub use self::ethereum_token_contract::EthereumTokenContract;
pub use self::ethereum_transaction::EthereumTransaction;
