//! Full-text search over zones, records and comments (`/search-data`).

use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    #[default]
    All,
    Zone,
    Record,
    Comment,
}

impl ObjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::All => "all",
            ObjectType::Zone => "zone",
            ObjectType::Record => "record",
            ObjectType::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
    pub name: String,
    pub object_type: ObjectType,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone: String,
    #[serde(rename = "type", default)]
    pub rrtype: String,
    #[serde(default)]
    pub ttl: u32,
}

#[derive(Clone)]
pub struct SearchClient {
    transport: PowerDnsClient,
}

impl SearchClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    /// `query` may use `*` and `?` wildcards; at most `max` results come back.
    pub async fn search(
        &self,
        ctx: &CallContext,
        server_id: &str,
        query: &str,
        max: u32,
        object_type: ObjectType,
    ) -> Result<Vec<SearchResult>> {
        validate_identifier("server id", server_id)?;
        let path = ApiPath::server(server_id)
            .push("search-data")
            .query("q", query)
            .query("max", max.to_string())
            .query("object_type", object_type.as_str());
        self.transport.get(ctx, &path).await
    }
}
