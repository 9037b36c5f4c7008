//! Sparse updates of zone-level settings (`PUT /zones/{id}`).
//!
//! Every field is optional and an unset field is left out of the payload, so
//! the server keeps its current value. `Some(false)` is sent as `false`.

use serde::Serialize;

use crate::zones::types::{SoaEditApi, Zone, ZoneKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneBasicDataUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ZoneKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit_api: Option<SoaEditApi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_rectify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsec3param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsec3narrow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

impl ZoneBasicDataUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ZoneKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn masters<I, S>(mut self, masters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.masters = Some(masters.into_iter().map(Into::into).collect());
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn soa_edit(mut self, soa_edit: impl Into<String>) -> Self {
        self.soa_edit = Some(soa_edit.into());
        self
    }

    pub fn soa_edit_api(mut self, mode: SoaEditApi) -> Self {
        self.soa_edit_api = Some(mode);
        self
    }

    pub fn api_rectify(mut self, enabled: bool) -> Self {
        self.api_rectify = Some(enabled);
        self
    }

    pub fn dnssec(mut self, enabled: bool) -> Self {
        self.dnssec = Some(enabled);
        self
    }

    pub fn nsec3param(mut self, param: impl Into<String>) -> Self {
        self.nsec3param = Some(param.into());
        self
    }

    pub fn nsec3narrow(mut self, narrow: bool) -> Self {
        self.nsec3narrow = Some(narrow);
        self
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// No field set; sending it would be a no-op.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl SoaEditApi {
    /// Policy in force after an update: an explicit request wins, otherwise the
    /// zone keeps what it has, and a zone that never had one uses `DEFAULT`.
    pub fn resolve(current: Option<SoaEditApi>, requested: Option<SoaEditApi>) -> SoaEditApi {
        requested.or(current).unwrap_or_default()
    }

    /// Whether API edits bump the SOA serial under this policy.
    pub fn increments_serial(self) -> bool {
        !matches!(self, SoaEditApi::Off)
    }
}

impl Zone {
    /// Replay a basic-data update onto this snapshot. Unset fields are untouched.
    pub fn apply_basic_data(&mut self, update: &ZoneBasicDataUpdate) {
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(masters) = &update.masters {
            self.masters = masters.clone();
        }
        if let Some(account) = &update.account {
            self.account = Some(account.clone());
        }
        if let Some(soa_edit) = &update.soa_edit {
            self.soa_edit = Some(soa_edit.clone());
        }
        if update.soa_edit_api.is_some() {
            self.soa_edit_api = Some(SoaEditApi::resolve(self.soa_edit_api, update.soa_edit_api));
        }
        if let Some(api_rectify) = update.api_rectify {
            self.api_rectify = api_rectify;
        }
        if let Some(dnssec) = update.dnssec {
            self.dnssec = dnssec;
        }
        if let Some(nsec3param) = &update.nsec3param {
            self.nsec3param = Some(nsec3param.clone());
        }
        if let Some(nsec3narrow) = update.nsec3narrow {
            self.nsec3narrow = nsec3narrow;
        }
        if let Some(catalog) = &update.catalog {
            self.catalog = Some(catalog.clone());
        }
    }
}
