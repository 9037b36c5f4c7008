//! Server discovery (`/servers`).

use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(rename = "type", default)]
    pub server_type: String, // "Server"
    pub id: String, // usually "localhost"
    #[serde(default)]
    pub daemon_type: String, // "authoritative" or "recursor"
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub config_url: String,
    #[serde(default)]
    pub zones_url: String,
}

#[derive(Clone)]
pub struct ServersClient {
    transport: PowerDnsClient,
}

impl ServersClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    pub async fn list_servers(&self, ctx: &CallContext) -> Result<Vec<Server>> {
        self.transport
            .get(ctx, &ApiPath::root().push("servers"))
            .await
    }

    pub async fn get_server(&self, ctx: &CallContext, server_id: &str) -> Result<Server> {
        validate_identifier("server id", server_id)?;
        self.transport.get(ctx, &ApiPath::server(server_id)).await
    }
}
