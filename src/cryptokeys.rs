//! DNSSEC key management for a zone (`/zones/{zone}/cryptokeys`).

use serde::{Deserialize, Serialize};

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Ksk,
    Zsk,
    #[default]
    Csk,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cryptokey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>, // "Cryptokey"
    #[serde(default)]
    pub keytype: KeyType,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnskey: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ds: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cds: Vec<String>,
    /// Private key in ISC format; only present on single-key GETs and imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privatekey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>, // "ECDSAP256SHA256"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
}

#[derive(Serialize)]
struct ActivationUpdate {
    active: bool,
}

#[derive(Clone)]
pub struct CryptokeysClient {
    transport: PowerDnsClient,
}

impl CryptokeysClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    fn keys_path(server_id: &str, zone_id: &str) -> Result<ApiPath> {
        validate_identifier("server id", server_id)?;
        validate_identifier("zone id", zone_id)?;
        Ok(ApiPath::zone(server_id, zone_id).push("cryptokeys"))
    }

    fn key_path(server_id: &str, zone_id: &str, key_id: u64) -> Result<ApiPath> {
        let keys = Self::keys_path(server_id, zone_id)?;
        Ok(keys.push(key_id.to_string()))
    }

    pub async fn list(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
    ) -> Result<Vec<Cryptokey>> {
        self.transport
            .get(ctx, &Self::keys_path(server_id, zone_id)?)
            .await
    }

    pub async fn get(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        key_id: u64,
    ) -> Result<Cryptokey> {
        let path = Self::key_path(server_id, zone_id, key_id)?;
        self.transport.get(ctx, &path).await
    }

    /// Generate a key, or import one when `privatekey` is set.
    pub async fn create(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        key: &Cryptokey,
    ) -> Result<Cryptokey> {
        self.transport
            .post(ctx, &Self::keys_path(server_id, zone_id)?, key)
            .await
    }

    pub async fn set_active(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        key_id: u64,
        active: bool,
    ) -> Result<()> {
        let path = Self::key_path(server_id, zone_id, key_id)?;
        self.transport
            .put_empty(ctx, &path, &ActivationUpdate { active })
            .await
    }

    pub async fn delete(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        key_id: u64,
    ) -> Result<()> {
        let path = Self::key_path(server_id, zone_id, key_id)?;
        self.transport.delete(ctx, &path).await
    }
}
