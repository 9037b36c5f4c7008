//! Encoding of record-set add/remove intents into the PATCH wire format.
//!
//! A [`ChangeSet`] serializes to `{"rrsets": [...]}` where every entry carries a
//! `changetype`. REPLACE with records creates or overwrites its (name, type)
//! set, REPLACE without records removes it, DELETE removes it whatever
//! records are attached.
//!
//! Duplicate keys in a REPLACE list are sent as-is: the server applies entries
//! in document order, so the last one wins. DELETE lists are collapsed to one
//! entry per key before sending.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::validate_rrset_key;
use crate::zones::rrset::RecordSetKey;
use crate::zones::types::ResourceRecordSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Replace,
    Delete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    rrsets: Vec<ResourceRecordSet>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One REPLACE entry per record set, TTL, records and comments verbatim.
    pub fn replacing<I>(rrsets: I) -> Self
    where
        I: IntoIterator<Item = ResourceRecordSet>,
    {
        let mut changes = Self::new();
        for rrset in rrsets {
            changes.replace(rrset);
        }
        changes
    }

    /// One DELETE entry per distinct key, in first-seen order. Only the key
    /// of each input is kept.
    pub fn deleting<'a, I>(rrsets: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a ResourceRecordSet>,
    {
        let mut changes = Self::new();
        for rrset in rrsets {
            changes.delete_key(&rrset.name, &rrset.rrtype)?;
        }
        Ok(changes)
    }

    pub fn replace(&mut self, mut rrset: ResourceRecordSet) -> &mut Self {
        rrset.changetype = Some(ChangeType::Replace);
        self.rrsets.push(rrset);
        self
    }

    /// Queue a DELETE for (name, type). A key that already has a DELETE entry
    /// is not queued twice.
    pub fn delete_key(&mut self, name: &str, rrtype: &str) -> Result<&mut Self> {
        validate_rrset_key(name, rrtype)?;
        let already_queued = self.rrsets.iter().any(|entry| {
            entry.changetype == Some(ChangeType::Delete) && entry.matches(name, rrtype)
        });
        if !already_queued {
            self.rrsets.push(ResourceRecordSet {
                name: name.to_string(),
                rrtype: rrtype.to_string(),
                ttl: 0,
                changetype: Some(ChangeType::Delete),
                records: Vec::new(),
                comments: Vec::new(),
            });
        }
        Ok(self)
    }

    pub fn entries(&self) -> &[ResourceRecordSet] {
        &self.rrsets
    }

    pub fn len(&self) -> usize {
        self.rrsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rrsets.is_empty()
    }

    /// Keys that appear in more than one entry. These are legal on the wire
    /// but their outcome depends on server ordering.
    pub fn duplicate_keys(&self) -> Vec<RecordSetKey> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for entry in &self.rrsets {
            let key = entry.key();
            if !seen.insert(key.clone()) && !dups.contains(&key) {
                dups.push(key);
            }
        }
        dups
    }
}
