// Shared helpers for the HTTP-level tests.
#![allow(dead_code)]

use std::time::Duration;

use pdns_client::{CallContext, Client, ClientConfig};
use wiremock::MockServer;

pub const API_KEY: &str = "secret";
pub const SERVER: &str = "localhost";

/// Start a mock PowerDNS API and a client pointed at it.
pub async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(server.uri())
        .with_api_key(API_KEY)
        .with_readiness_poll_interval(Duration::from_millis(50));
    let client = Client::new(config).expect("client config should be valid");
    (server, client)
}

/// Path of a zone below the mock server, as the client encodes it.
pub fn zone_path(zone: &str) -> String {
    format!("/api/v1/servers/{SERVER}/zones/{zone}")
}

pub fn ctx() -> CallContext {
    CallContext::with_timeout(Duration::from_secs(5))
}
