//! TSIG key management (`/servers/{server}/tsigkeys`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

/// List responses omit `key`; single-key GETs include it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsigKey {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String, // often the name with a trailing dot
    pub name: String,
    pub algorithm: String, // "hmac-sha256"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String, // base64; empty on create lets the server generate one
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub key_type: String, // "TSIGKey"
}

impl std::fmt::Debug for TsigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsigKey")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("algorithm", &self.algorithm)
            .field("key", &if self.key.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Sparse change to an existing key. Unset fields are left out of the
/// payload and keep their stored value.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct TsigKeyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl TsigKeyUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// New base64 key material.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Debug for TsigKeyUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsigKeyUpdate")
            .field("name", &self.name)
            .field("algorithm", &self.algorithm)
            .field("key", &self.key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Clone)]
pub struct TsigKeysClient {
    transport: PowerDnsClient,
}

impl TsigKeysClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    fn keys_path(server_id: &str) -> Result<ApiPath> {
        validate_identifier("server id", server_id)?;
        Ok(ApiPath::server(server_id).push("tsigkeys"))
    }

    fn key_path(server_id: &str, key_id: &str) -> Result<ApiPath> {
        validate_identifier("tsig key id", key_id)?;
        Ok(Self::keys_path(server_id)?.push(key_id))
    }

    pub async fn list(&self, ctx: &CallContext, server_id: &str) -> Result<Vec<TsigKey>> {
        self.transport.get(ctx, &Self::keys_path(server_id)?).await
    }

    pub async fn create(
        &self,
        ctx: &CallContext,
        server_id: &str,
        input: &TsigKey,
    ) -> Result<TsigKey> {
        validate_identifier("tsig key name", &input.name)?;
        self.transport
            .post(ctx, &Self::keys_path(server_id)?, input)
            .await
    }

    pub async fn get(
        &self,
        ctx: &CallContext,
        server_id: &str,
        key_id: &str,
    ) -> Result<TsigKey> {
        self.transport
            .get(ctx, &Self::key_path(server_id, key_id)?)
            .await
    }

    /// Change name, algorithm or key material. Only fields set on `update`
    /// are sent; an empty update sends no PUT and returns the stored key.
    pub async fn update(
        &self,
        ctx: &CallContext,
        server_id: &str,
        key_id: &str,
        update: &TsigKeyUpdate,
    ) -> Result<TsigKey> {
        let path = Self::key_path(server_id, key_id)?;
        if let Some(name) = &update.name {
            validate_identifier("tsig key name", name)?;
        }
        if update.is_empty() {
            debug!(key = key_id, "empty tsig key update, fetching instead");
            return self.transport.get(ctx, &path).await;
        }
        self.transport.put(ctx, &path, update).await
    }

    pub async fn delete(
        &self,
        ctx: &CallContext,
        server_id: &str,
        key_id: &str,
    ) -> Result<()> {
        self.transport
            .delete(ctx, &Self::key_path(server_id, key_id)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_debug_masks_key_material() {
        let key = TsigKey {
            name: "integration-key".into(),
            algorithm: "hmac-sha256".into(),
            key: "dGVzdGtleQ==".into(),
            ..Default::default()
        };
        let printed = format!("{key:?}");
        assert!(printed.contains("integration-key"));
        assert!(!printed.contains("dGVzdGtleQ=="));

        let update = TsigKeyUpdate::new().key("dGVzdGtleQ==");
        assert!(!format!("{update:?}").contains("dGVzdGtleQ=="));
    }

    #[test]
    fn test_update_sends_only_set_fields() {
        let update = TsigKeyUpdate::new().key("bmV3a2V5");
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"key": "bmV3a2V5"}));

        let update = TsigKeyUpdate::new()
            .name("renamed")
            .algorithm("hmac-sha512");
        let value = serde_json::to_value(&update).unwrap();
        let expected = json!({"name": "renamed", "algorithm": "hmac-sha512"});
        assert_eq!(value, expected);
    }

    #[test]
    fn test_empty_update() {
        assert!(TsigKeyUpdate::new().is_empty());
        let value = serde_json::to_value(TsigKeyUpdate::new()).unwrap();
        assert_eq!(value, json!({}));
        assert!(!TsigKeyUpdate::new().name("renamed").is_empty());
    }
}
