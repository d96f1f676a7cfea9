pub mod util;

use std::net::SocketAddr;

use chainql_server::ChainQlServer;
use chainql_server::ChainQlServerManager;
use reqwest::header::CONTENT_TYPE;
use serde_json::json;
use serde_json::Value;

use self::util::node::{FakeNode, ZERO_HASH};
use self::util::TestEnv;

const BLOCK: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

async fn start(env: &TestEnv) -> ChainQlServerManager {
    let server = ChainQlServer::new(
        env.loader_factory.clone(),
        env.call_client.clone(),
        env.logger.clone(),
    );

    server.start(0).await.unwrap()
}

fn url(addr: SocketAddr) -> String {
    format!("http://127.0.0.1:{}/", addr.port())
}

async fn post(addr: SocketAddr, query: &str) -> Value {
    let body = serde_json::to_vec(&json!({ "query": query })).unwrap();

    let response = reqwest::Client::new()
        .post(url(addr))
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());

    serde_json::from_slice(&response.bytes().await.unwrap()).unwrap()
}

#[tokio::test]
async fn graphql_requests_are_served() {
    let env = TestEnv::new(FakeNode::default().with_block(BLOCK, ZERO_HASH, &[], &[]));
    let server = start(&env).await;

    let query = format!(r#"{{ block(network: "mainnet", hash: "{BLOCK}") {{ hash number }} }}"#);
    let response = post(server.local_addr(), &query).await;

    assert_eq!(
        response,
        json!({ "data": { "block": { "hash": BLOCK, "number": 16 } } })
    );

    server.stop_server();
}

#[tokio::test]
async fn every_request_gets_its_own_cache() {
    let env = TestEnv::new(FakeNode::default().with_block(BLOCK, ZERO_HASH, &[], &[]));
    let server = start(&env).await;

    let query = format!(r#"{{ block(network: "mainnet", hash: "{BLOCK}") {{ hash }} }}"#);

    post(server.local_addr(), &query).await;
    post(server.local_addr(), &query).await;

    assert_eq!(env.node.count("eth_getBlockByHash"), 2);

    server.stop_server();
}

#[tokio::test]
async fn graphiql_is_served() {
    let env = TestEnv::new(FakeNode::default());
    let server = start(&env).await;

    let response = reqwest::get(url(server.local_addr())).await.unwrap();

    assert!(response.status().is_success());

    let page = response.text().await.unwrap();

    assert!(page.contains("graphiql"), "{page}");

    server.stop_server();
}
