//! Input checks applied before a request is built.
//!
//! Record contents, name case and trailing dots are the server's business and
//! pass through untouched; only structurally unusable input is rejected here.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record set name is empty")]
    EmptyName,
    #[error("record set type is empty")]
    EmptyType,
    #[error("{0} is empty")]
    EmptyIdentifier(&'static str),
    #[error("rrset filter type requires a filter name")]
    FilterTypeWithoutName,
    #[error("prefix length {0} is out of range (max 128)")]
    PrefixLength(u8),
}

/// Check the (name, type) key that identifies a record set.
pub fn validate_rrset_key(name: &str, rtype: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if rtype.is_empty() {
        return Err(ValidationError::EmptyType);
    }
    Ok(())
}

/// Path identifiers (server ID, zone ID, kind, ...) must not be empty, or the
/// request would silently address the parent collection instead.
pub fn validate_identifier(what: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyIdentifier(what));
    }
    Ok(())
}

pub fn validate_prefix_len(prefix_len: u8) -> Result<(), ValidationError> {
    if prefix_len > 128 {
        return Err(ValidationError::PrefixLength(prefix_len));
    }
    Ok(())
}
