//! Zone metadata (`/zones/{zone}/metadata`) with client-side guardrails for
//! kinds the endpoint refuses to write.

pub mod kinds;

pub use kinds::{KindAccess, MetadataKind, classify, is_custom_kind};

use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub kind: String, // "ALLOW-AXFR-FROM", "X-MyApp-Owner"
    #[serde(default)]
    pub metadata: Vec<String>,
}

impl Metadata {
    pub fn new<I, S>(kind: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            metadata: values.into_iter().map(Into::into).collect(),
        }
    }
}

fn ensure_writable(kind: &str) -> Result<()> {
    match classify(kind) {
        KindAccess::Writable => Ok(()),
        KindAccess::ReadOnly => Err(Error::ReadOnlyKind),
        KindAccess::NotViaHttp => Err(Error::NotViaHttp),
    }
}

#[derive(Clone)]
pub struct MetadataClient {
    transport: PowerDnsClient,
}

impl MetadataClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    fn metadata_path(server_id: &str, zone_id: &str) -> Result<ApiPath> {
        validate_identifier("server id", server_id)?;
        validate_identifier("zone id", zone_id)?;
        Ok(ApiPath::zone(server_id, zone_id).push("metadata"))
    }

    fn kind_path(server_id: &str, zone_id: &str, kind: &str) -> Result<ApiPath> {
        validate_identifier("metadata kind", kind)?;
        Ok(Self::metadata_path(server_id, zone_id)?.push(kind))
    }

    pub async fn list(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
    ) -> Result<Vec<Metadata>> {
        self.transport
            .get(ctx, &Self::metadata_path(server_id, zone_id)?)
            .await
    }

    pub async fn get(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        kind: &str,
    ) -> Result<Metadata> {
        self.transport
            .get(ctx, &Self::kind_path(server_id, zone_id, kind)?)
            .await
    }

    /// Add values for a kind; existing values of that kind are kept.
    pub async fn create(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        input: &Metadata,
    ) -> Result<()> {
        ensure_writable(&input.kind)?;
        validate_identifier("metadata kind", &input.kind)?;
        self.transport
            .post_empty(ctx, &Self::metadata_path(server_id, zone_id)?, input)
            .await
    }

    /// Replace the whole value set of `kind` and return what the server stored.
    pub async fn replace(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        kind: &str,
        input: &Metadata,
    ) -> Result<Metadata> {
        ensure_writable(kind)?;
        self.transport
            .put(ctx, &Self::kind_path(server_id, zone_id, kind)?, input)
            .await
    }

    pub async fn delete(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        kind: &str,
    ) -> Result<()> {
        ensure_writable(kind)?;
        self.transport
            .delete(ctx, &Self::kind_path(server_id, zone_id, kind)?)
            .await
    }
}
