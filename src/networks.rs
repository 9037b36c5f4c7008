//! Network-to-view assignments (`/servers/{server}/networks`).

use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::{validate_identifier, validate_prefix_len};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkView {
    pub network: String, // "203.0.113.0/24"
    #[serde(default)]
    pub view: String,
}

// Some server versions wrap the list in an object, others return it bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum NetworkList {
    Wrapped { networks: Vec<NetworkView> },
    Bare(Vec<NetworkView>),
}

impl From<NetworkList> for Vec<NetworkView> {
    fn from(list: NetworkList) -> Self {
        match list {
            NetworkList::Wrapped { networks } => networks,
            NetworkList::Bare(networks) => networks,
        }
    }
}

#[derive(Serialize)]
struct ViewAssignment<'a> {
    view: &'a str,
}

#[derive(Clone)]
pub struct NetworksClient {
    transport: PowerDnsClient,
}

impl NetworksClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    fn network_path(server_id: &str, ip: &str, prefix_len: u8) -> Result<ApiPath> {
        validate_identifier("server id", server_id)?;
        validate_identifier("network address", ip)?;
        validate_prefix_len(prefix_len)?;
        Ok(ApiPath::server(server_id)
            .push("networks")
            .push(ip)
            .push(prefix_len.to_string()))
    }

    pub async fn list_networks(
        &self,
        ctx: &CallContext,
        server_id: &str,
    ) -> Result<Vec<NetworkView>> {
        validate_identifier("server id", server_id)?;
        let list: NetworkList = self
            .transport
            .get(ctx, &ApiPath::server(server_id).push("networks"))
            .await?;
        Ok(list.into())
    }

    pub async fn get_network_view(
        &self,
        ctx: &CallContext,
        server_id: &str,
        ip: &str,
        prefix_len: u8,
    ) -> Result<NetworkView> {
        self.transport
            .get(ctx, &Self::network_path(server_id, ip, prefix_len)?)
            .await
    }

    /// Assign `view` to the network; an empty view removes the assignment.
    pub async fn set_network_view(
        &self,
        ctx: &CallContext,
        server_id: &str,
        ip: &str,
        prefix_len: u8,
        view: &str,
    ) -> Result<()> {
        self.transport
            .put_empty(
                ctx,
                &Self::network_path(server_id, ip, prefix_len)?,
                &ViewAssignment { view },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_list_accepts_both_shapes() {
        let entry = json!({"network": "203.0.113.0/24", "view": "internal"});
        let wrapped = json!({ "networks": [entry.clone()] });
        let bare = json!([entry]);
        let wrapped: NetworkList = serde_json::from_value(wrapped).unwrap();
        let bare: NetworkList = serde_json::from_value(bare).unwrap();
        let wrapped: Vec<NetworkView> = wrapped.into();
        let bare: Vec<NetworkView> = bare.into();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[0].view, "internal");
    }
}
