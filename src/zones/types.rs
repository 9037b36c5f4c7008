use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::zones::changeset::ChangeType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    #[default]
    Native,
    Master,
    Slave,
    Producer,
    Consumer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneType {
    #[default]
    Zone,
}

/// SOA-EDIT-API policy: how the server bumps the SOA serial on API changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoaEditApi {
    #[default]
    #[serde(rename = "DEFAULT")]
    Default,
    #[serde(rename = "INCREASE")]
    Increase,
    #[serde(rename = "EPOCH")]
    Epoch,
    #[serde(rename = "SOA-EDIT")]
    SoaEdit,
    #[serde(rename = "SOA-EDIT-INCREASE")]
    SoaEditIncrease,
    /// Serial is left alone on API edits.
    #[serde(rename = "")]
    Off,
}

/// A zone as returned by the server. Fetched values are snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String, // "example.de." (server assigned)
    pub name: String, // "example.de."
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<ZoneType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>, // "/api/v1/servers/localhost/zones/example.de."
    #[serde(default)]
    pub kind: ZoneKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rrsets: Vec<ResourceRecordSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_serial: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_serial: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub masters: Vec<String>,
    #[serde(default)]
    pub dnssec: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsec3param: Option<String>,
    #[serde(default)]
    pub nsec3narrow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presigned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa_edit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa_edit_api: Option<SoaEditApi>,
    #[serde(default)]
    pub api_rectify: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>, // zone file content, create only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>, // ["ns1.example.net.", "ns2.example.net."], create only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub master_tsig_key_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slave_tsig_key_ids: Vec<String>,
}

impl Zone {
    /// Minimal zone definition for `create_zone`.
    pub fn new(name: impl Into<String>, kind: ZoneKind) -> Self {
        Self {
            name: name.into(),
            zone_type: Some(ZoneType::Zone),
            kind,
            ..Default::default()
        }
    }

    pub fn with_nameservers<I, S>(mut self, nameservers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nameservers = nameservers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rrset(mut self, rrset: ResourceRecordSet) -> Self {
        self.rrsets.push(rrset);
        self
    }
}

/// All records sharing one (name, type) key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    pub name: String, // "www.example.com."
    #[serde(rename = "type")]
    pub rrtype: String, // "A", "NS", ...
    #[serde(default)]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<ChangeType>, // only on outgoing patches
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl ResourceRecordSet {
    pub fn new<I, S>(
        name: impl Into<String>,
        rrtype: impl Into<String>,
        ttl: u32,
        contents: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            rrtype: rrtype.into(),
            ttl,
            changetype: None,
            records: contents.into_iter().map(Record::new).collect(),
            comments: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub content: String, // "192.0.2.1" or "ns1.example.net."
    #[serde(default)]
    pub disabled: bool,
    /// Set by the server, never sent.
    #[serde(default, skip_serializing)]
    pub modified_at: Option<i64>,
}

impl Record {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: false,
            modified_at: None,
        }
    }

    pub fn disabled(content: impl Into<String>) -> Self {
        Self {
            disabled: true,
            ..Self::new(content)
        }
    }

    pub fn modified_at_utc(&self) -> Option<DateTime<Utc>> {
        self.modified_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<i64>,
}

impl Comment {
    pub fn new(content: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            account: account.into(),
            modified_at: None,
        }
    }

    pub fn modified_at_utc(&self) -> Option<DateTime<Utc>> {
        self.modified_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}
