//! Record-set identity, lookup and local reconciliation of change sets.

use crate::zones::changeset::{ChangeSet, ChangeType};
use crate::zones::types::{ResourceRecordSet, Zone};

/// Identity of a record set. Compared byte for byte; the server owns case
/// and trailing-dot rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordSetKey {
    pub name: String,
    pub rrtype: String,
}

impl RecordSetKey {
    pub fn new(name: impl Into<String>, rrtype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rrtype: rrtype.into(),
        }
    }
}

impl std::fmt::Display for RecordSetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.rrtype)
    }
}

impl ResourceRecordSet {
    pub fn key(&self) -> RecordSetKey {
        RecordSetKey::new(&self.name, &self.rrtype)
    }

    pub fn matches(&self, name: &str, rrtype: &str) -> bool {
        self.name == name && self.rrtype == rrtype
    }

    /// True when applying this patch entry removes its key on the server:
    /// DELETE, or REPLACE with no records.
    pub fn removes_key(&self) -> bool {
        self.changetype == Some(ChangeType::Delete) || self.records.is_empty()
    }
}

impl Zone {
    /// Exact (name, type) lookup. `None` means the zone snapshot has no such set.
    pub fn find_rrset(&self, name: &str, rrtype: &str) -> Option<&ResourceRecordSet> {
        self.rrsets.iter().find(|rrset| rrset.matches(name, rrtype))
    }

    /// Replay a change set onto this snapshot the way the server applies a
    /// PATCH: entries in document order, so a repeated key ends with the last
    /// entry. Replaced sets keep their position; new ones are appended.
    pub fn apply_change_set(&mut self, changes: &ChangeSet) {
        for entry in changes.entries() {
            if entry.removes_key() {
                self.rrsets.retain(|rrset| !rrset.matches(&entry.name, &entry.rrtype));
                continue;
            }

            let mut replacement = entry.clone();
            replacement.changetype = None;
            match self
                .rrsets
                .iter_mut()
                .find(|rrset| rrset.matches(&entry.name, &entry.rrtype))
            {
                Some(existing) => *existing = replacement,
                None => self.rrsets.push(replacement),
            }
        }
    }
}
