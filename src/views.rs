//! Views: named sets of zone variants selected per client network.

use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsList {
    #[serde(default)]
    pub views: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewZones {
    #[serde(default)]
    pub zones: Vec<String>, // zone variants, e.g. "example.de." or "example.de..internal"
}

#[derive(Serialize)]
struct ZoneVariant<'a> {
    name: &'a str,
}

#[derive(Clone)]
pub struct ViewsClient {
    transport: PowerDnsClient,
}

impl ViewsClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    fn view_path(server_id: &str, view: &str) -> Result<ApiPath> {
        validate_identifier("server id", server_id)?;
        validate_identifier("view", view)?;
        Ok(ApiPath::server(server_id).push("views").push(view))
    }

    pub async fn list_views(&self, ctx: &CallContext, server_id: &str) -> Result<ViewsList> {
        validate_identifier("server id", server_id)?;
        self.transport
            .get(ctx, &ApiPath::server(server_id).push("views"))
            .await
    }

    pub async fn list_view_zones(
        &self,
        ctx: &CallContext,
        server_id: &str,
        view: &str,
    ) -> Result<ViewZones> {
        self.transport
            .get(ctx, &Self::view_path(server_id, view)?)
            .await
    }

    /// Add a zone variant to a view; the view is created on first use.
    pub async fn add_zone_to_view(
        &self,
        ctx: &CallContext,
        server_id: &str,
        view: &str,
        zone_variant: &str,
    ) -> Result<()> {
        validate_identifier("zone variant", zone_variant)?;
        self.transport
            .post_empty(
                ctx,
                &Self::view_path(server_id, view)?,
                &ZoneVariant { name: zone_variant },
            )
            .await
    }

    pub async fn remove_zone_from_view(
        &self,
        ctx: &CallContext,
        server_id: &str,
        view: &str,
        zone_variant: &str,
    ) -> Result<()> {
        validate_identifier("zone variant", zone_variant)?;
        let path = Self::view_path(server_id, view)?.push(zone_variant);
        self.transport.delete(ctx, &path).await
    }
}
