use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chainql_chain_ethereum::JsonRpcTransport;
use chainql_chain_ethereum::RpcCall;
use chainql_chain_ethereum::RpcError;
use chainql_chain_ethereum::RpcResult;
use chainql_primitives::BoxedFuture;
use serde_json::json;
use serde_json::Value;

pub const ZERO_HASH: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

/// An in-memory node that knows a fixed set of blocks, transactions,
/// accounts and contract call results.
#[derive(Clone, Default)]
pub struct FakeNode {
    blocks: Arc<Mutex<HashMap<String, Value>>>,
    transactions: Arc<Mutex<HashMap<String, Value>>>,
    receipts: Arc<Mutex<HashMap<String, Value>>>,
    balances: Arc<Mutex<HashMap<String, String>>>,
    call_results: Arc<Mutex<HashMap<String, String>>>,
    batches: Arc<Mutex<Vec<Vec<&'static str>>>>,
}

impl FakeNode {
    pub fn with_block(self, hash: &str, parent_hash: &str, transactions: &[&str], uncles: &[&str]) -> Self {
        let block = json!({
            "hash": hash,
            "parentHash": parent_hash,
            "number": "0x10",
            "timestamp": "0x64",
            "miner": "0x00000000000000000000000000000000000000aa",
            "difficulty": "0x0",
            "gasLimit": "0x1c9c380",
            "gasUsed": "0x5208",
            "size": "0x220",
            "extraData": "0x",
            "transactions": transactions,
            "uncles": uncles
        });

        self.blocks.lock().unwrap().insert(hash.to_owned(), block);
        self
    }

    pub fn with_transaction(self, hash: &str, block_hash: &str, from: &str, to: Option<&str>) -> Self {
        let transaction = json!({
            "hash": hash,
            "blockHash": block_hash,
            "blockNumber": "0x10",
            "transactionIndex": "0x0",
            "from": from,
            "to": to,
            "value": "0xde0b6b3a7640000",
            "gas": "0x5208",
            "gasPrice": "0x3b9aca00",
            "nonce": "0x1",
            "input": "0x"
        });

        self.transactions.lock().unwrap().insert(hash.to_owned(), transaction);
        self
    }

    pub fn with_receipt(self, hash: &str, logs: Value) -> Self {
        let receipt = json!({
            "transactionHash": hash,
            "status": "0x1",
            "logs": logs
        });

        self.receipts.lock().unwrap().insert(hash.to_owned(), receipt);
        self
    }

    pub fn with_balance(self, address: &str, balance: &str) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_ascii_lowercase(), balance.to_owned());
        self
    }

    /// Answers `eth_call` with the given selector; other selectors revert.
    pub fn with_call_result(self, selector: &str, output: String) -> Self {
        self.call_results.lock().unwrap().insert(selector.to_owned(), output);
        self
    }

    /// Returns the methods of every batch received so far.
    pub fn batches(&self) -> Vec<Vec<&'static str>> {
        self.batches.lock().unwrap().clone()
    }

    /// Returns the number of calls of a method across all batches.
    pub fn count(&self, method: &str) -> usize {
        self.batches()
            .iter()
            .flatten()
            .filter(|called| **called == method)
            .count()
    }

    /// Returns the number of batches that contain a method.
    pub fn batches_with(&self, method: &str) -> usize {
        self.batches()
            .iter()
            .filter(|batch| batch.contains(&method))
            .count()
    }

    fn respond(&self, call: &RpcCall) -> RpcResult {
        let id = call.params()[0].as_str().unwrap_or_default().to_ascii_lowercase();

        let result = match call.method() {
            "eth_getBlockByHash" => self.blocks.lock().unwrap().get(&id).cloned(),
            "eth_getTransactionByHash" => self.transactions.lock().unwrap().get(&id).cloned(),
            "eth_getTransactionReceipt" => self.receipts.lock().unwrap().get(&id).cloned(),
            "eth_getBlockTransactionCountByHash" => self
                .blocks
                .lock()
                .unwrap()
                .get(&id)
                .map(|block| json!(format!("0x{:x}", block["transactions"].as_array().unwrap().len()))),
            "eth_getBalance" => {
                let balance = self.balances.lock().unwrap().get(&id).cloned();
                Some(json!(balance.unwrap_or_else(|| "0x0".to_owned())))
            }
            "eth_getTransactionCount" => Some(json!("0x0")),
            "eth_getCode" => Some(json!("0x")),
            "eth_call" => {
                let data = call.params()[0]["data"].as_str().unwrap_or_default();
                let selector = &data[..10];

                match self.call_results.lock().unwrap().get(selector) {
                    Some(output) => Some(json!(output)),
                    None => {
                        return Err(RpcError::Node {
                            code: 3,
                            message: "execution reverted".to_owned(),
                            data: None,
                        })
                    }
                }
            }
            method => panic!("unexpected call to `{method}`"),
        };

        Ok(result)
    }
}

impl JsonRpcTransport for FakeNode {
    fn batch(&self, calls: Vec<RpcCall>) -> BoxedFuture<Vec<RpcResult>, anyhow::Error> {
        self.batches
            .lock()
            .unwrap()
            .push(calls.iter().map(RpcCall::method).collect());

        let results = calls.iter().map(|call| self.respond(call)).collect();

        Box::pin(async move { Ok(results) })
    }
}
