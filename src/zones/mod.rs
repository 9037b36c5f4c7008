//! Zones API: zone CRUD, record-set patches, filtered fetches and
//! basic-data updates.

pub mod basic_data;
pub mod changeset;
pub mod fetch;
pub mod rrset;
pub mod types;

pub use basic_data::ZoneBasicDataUpdate;
pub use changeset::{ChangeSet, ChangeType};
pub use fetch::{RrsetFilter, ZoneFetchOptions};
pub use rrset::RecordSetKey;
pub use types::{Comment, Record, ResourceRecordSet, SoaEditApi, Zone, ZoneKind, ZoneType};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::context::CallContext;
use crate::error::Result;
use crate::powerdns::{ApiPath, PowerDnsClient};
use crate::validation::validate_identifier;

#[derive(Debug, Deserialize)]
struct ResultMessage {
    result: String, // "Notification queued", "Rectified", ...
}

#[derive(Clone)]
pub struct ZonesClient {
    transport: PowerDnsClient,
}

impl ZonesClient {
    pub fn new(transport: PowerDnsClient) -> Self {
        Self { transport }
    }

    fn zone_path(server_id: &str, zone_id: &str) -> Result<ApiPath> {
        validate_identifier("server id", server_id)?;
        validate_identifier("zone id", zone_id)?;
        Ok(ApiPath::zone(server_id, zone_id))
    }

    pub async fn list_zones(&self, ctx: &CallContext, server_id: &str) -> Result<Vec<Zone>> {
        validate_identifier("server id", server_id)?;
        self.transport
            .get(ctx, &ApiPath::server(server_id).push("zones"))
            .await
    }

    pub async fn get_zone(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        options: &ZoneFetchOptions,
    ) -> Result<Zone> {
        let path = options.apply(Self::zone_path(server_id, zone_id)?);
        self.transport.get(ctx, &path).await
    }

    /// Create a zone; the returned value carries the server-assigned ID.
    /// A zone that already exists yields `Error::Conflict`.
    pub async fn create_zone(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone: &Zone,
    ) -> Result<Zone> {
        validate_identifier("server id", server_id)?;
        validate_identifier("zone name", &zone.name)?;
        self.transport
            .post(ctx, &ApiPath::server(server_id).push("zones"), zone)
            .await
    }

    /// Deleting a zone that is already gone is reported as `Error::NotFound`.
    pub async fn delete_zone(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
    ) -> Result<()> {
        self.transport
            .delete(ctx, &Self::zone_path(server_id, zone_id)?)
            .await
    }

    /// Zone contents in zone-file format.
    pub async fn export_zone(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
    ) -> Result<String> {
        let path = Self::zone_path(server_id, zone_id)?.push("export");
        self.transport.get_text(ctx, &path).await
    }

    /// Send NOTIFY to the zone's slaves.
    pub async fn notify_zone(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
    ) -> Result<String> {
        let path = Self::zone_path(server_id, zone_id)?.push("notify");
        let msg: ResultMessage = self.transport.put_for(ctx, &path).await?;
        Ok(msg.result)
    }

    pub async fn rectify_zone(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
    ) -> Result<String> {
        let path = Self::zone_path(server_id, zone_id)?.push("rectify");
        let msg: ResultMessage = self.transport.put_for(ctx, &path).await?;
        Ok(msg.result)
    }

    /// Ask a slave zone to retrieve itself from its master.
    pub async fn axfr_retrieve(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
    ) -> Result<String> {
        let path = Self::zone_path(server_id, zone_id)?.push("axfr-retrieve");
        let msg: ResultMessage = self.transport.put_for(ctx, &path).await?;
        Ok(msg.result)
    }

    /// Update zone-level settings. Only fields set on `update` are sent; an
    /// update with nothing set sends no request.
    pub async fn modify_basic_zone_data(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        update: &ZoneBasicDataUpdate,
    ) -> Result<()> {
        let path = Self::zone_path(server_id, zone_id)?;
        if update.is_empty() {
            debug!(zone = zone_id, "empty basic data update, nothing to send");
            return Ok(());
        }
        self.transport.put_empty(ctx, &path, update).await
    }

    /// Create or overwrite one record set.
    pub async fn add_record_set(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        rrset: ResourceRecordSet,
    ) -> Result<()> {
        let changes = ChangeSet::replacing([rrset]);
        self.apply_change_set(ctx, server_id, zone_id, &changes)
            .await
    }

    /// Create or overwrite several record sets in one PATCH.
    pub async fn add_record_sets(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        rrsets: Vec<ResourceRecordSet>,
    ) -> Result<()> {
        let changes = ChangeSet::replacing(rrsets);
        self.apply_change_set(ctx, server_id, zone_id, &changes)
            .await
    }

    /// Remove the record set identified by (name, type).
    pub async fn remove_record_set(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        name: &str,
        rrtype: &str,
    ) -> Result<()> {
        let mut changes = ChangeSet::new();
        changes.delete_key(name, rrtype)?;
        self.apply_change_set(ctx, server_id, zone_id, &changes)
            .await
    }

    /// Remove record sets, typically ones previously fetched. Only their keys
    /// are sent, one entry per distinct key.
    pub async fn remove_record_sets(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        rrsets: &[ResourceRecordSet],
    ) -> Result<()> {
        let changes = ChangeSet::deleting(rrsets)?;
        self.apply_change_set(ctx, server_id, zone_id, &changes)
            .await
    }

    /// Submit a change set as exactly one PATCH. The server applies it
    /// atomically; on failure nothing can be assumed about the zone without a
    /// fresh fetch. An empty change set sends nothing.
    pub async fn apply_change_set(
        &self,
        ctx: &CallContext,
        server_id: &str,
        zone_id: &str,
        changes: &ChangeSet,
    ) -> Result<()> {
        let path = Self::zone_path(server_id, zone_id)?;
        if changes.is_empty() {
            debug!(zone = zone_id, "empty change set, nothing to send");
            return Ok(());
        }

        let duplicates = changes.duplicate_keys();
        if !duplicates.is_empty() {
            warn!(
                zone = zone_id,
                keys = ?duplicates,
                "change set repeats record set keys; the server applies the last entry"
            );
        }

        let entries = changes.len();
        debug!(zone = zone_id, entries, "patching record sets");
        self.transport.patch_empty(ctx, &path, changes).await
    }
}
