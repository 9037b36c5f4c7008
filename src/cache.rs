use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheFlushResult {
    pub count: u64,
    pub result: String,
}

#[derive(Clone)]
pub struct CacheClient {
    transport: PowerDnsClient,
}

impl CacheClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    /// Drop cached entries for `domain` and everything below it.
    pub async fn flush(
        &self,
        ctx: &CallContext,
        server_id: &str,
        domain: &str,
    ) -> Result<CacheFlushResult> {
        validate_identifier("server id", server_id)?;
        validate_identifier("domain", domain)?;
        let path = ApiPath::server(server_id)
            .push("cache")
            .push("flush")
            .query("domain", domain);
        self.transport.put_for(ctx, &path).await
    }
}
