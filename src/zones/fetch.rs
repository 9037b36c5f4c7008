//! Read-time options for `get_zone`, encoded as query parameters so the server
//! does the trimming.

use tracing::debug;

use crate::powerdns::ApiPath;
use crate::validation::ValidationError;

/// Restrict the returned record sets to one name, optionally one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrsetFilter {
    name: String,
    rrtype: Option<String>,
}

impl RrsetFilter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rrtype(&self) -> Option<&str> {
        self.rrtype.as_deref()
    }
}

/// Options for fetching one zone.
///
/// `omit_rrsets` and a filter do not combine: a filter asks for record data,
/// so when both are given the filter wins and `rrsets=false` is not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneFetchOptions {
    omit_rrsets: bool,
    filter: Option<RrsetFilter>,
}

impl ZoneFetchOptions {
    pub fn new(
        omit_rrsets: bool,
        filter_name: Option<&str>,
        filter_type: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let filter = match (filter_name, filter_type) {
            (None, None) => None,
            (None, Some(_)) => return Err(ValidationError::FilterTypeWithoutName),
            (Some(""), _) => return Err(ValidationError::EmptyName),
            (Some(_), Some("")) => return Err(ValidationError::EmptyType),
            (Some(name), rrtype) => Some(RrsetFilter {
                name: name.to_string(),
                rrtype: rrtype.map(str::to_string),
            }),
        };
        if omit_rrsets && filter.is_some() {
            debug!("rrset filter overrides omit_rrsets");
        }
        Ok(Self { omit_rrsets, filter })
    }

    /// Full zone including every record set.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn without_rrsets() -> Self {
        Self {
            omit_rrsets: true,
            filter: None,
        }
    }

    pub fn filtered(name: &str, rrtype: &str) -> Result<Self, ValidationError> {
        Self::new(false, Some(name), Some(rrtype))
    }

    pub fn omits_rrsets(&self) -> bool {
        self.omit_rrsets && self.filter.is_none()
    }

    pub fn filter(&self) -> Option<&RrsetFilter> {
        self.filter.as_ref()
    }

    pub(crate) fn apply(&self, mut path: ApiPath) -> ApiPath {
        if let Some(filter) = &self.filter {
            path = path.query("rrset_name", filter.name.clone());
            if let Some(rrtype) = &filter.rrtype {
                path = path.query("rrset_type", rrtype.clone());
            }
        } else if self.omit_rrsets {
            path = path.query("rrsets", "false");
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(options: &ZoneFetchOptions) -> Vec<(&'static str, String)> {
        options
            .apply(ApiPath::zone("localhost", "example.de."))
            .query_pairs()
            .to_vec()
    }

    #[test]
    fn test_default_sends_no_query() {
        assert!(query(&ZoneFetchOptions::all()).is_empty());
    }

    #[test]
    fn test_without_rrsets() {
        assert_eq!(
            query(&ZoneFetchOptions::without_rrsets()),
            vec![("rrsets", "false".to_string())]
        );
    }

    #[test]
    fn test_filter_name_and_type() {
        let options = ZoneFetchOptions::filtered("bar.example4.de.", "TXT")
            .unwrap();
        assert_eq!(
            query(&options),
            vec![
                ("rrset_name", "bar.example4.de.".to_string()),
                ("rrset_type", "TXT".to_string())
            ]
        );
    }

    #[test]
    fn test_filter_name_only() {
        let name = Some("bar.example4.de.");
        let options = ZoneFetchOptions::new(false, name, None).unwrap();
        assert_eq!(options.filter().unwrap().rrtype(), None);
        assert_eq!(
            query(&options),
            vec![("rrset_name", "bar.example4.de.".to_string())]
        );
    }

    #[test]
    fn test_filter_wins_over_omit() {
        let name = Some("bar.example4.de.");
        let options = ZoneFetchOptions::new(true, name, Some("A")).unwrap();
        assert!(!options.omits_rrsets());
        let pairs = query(&options);
        assert!(pairs.iter().all(|(k, _)| *k != "rrsets"));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_invalid_combinations() {
        assert_eq!(
            ZoneFetchOptions::new(false, None, Some("A")),
            Err(ValidationError::FilterTypeWithoutName)
        );
        assert_eq!(
            ZoneFetchOptions::new(false, Some(""), None),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            ZoneFetchOptions::filtered("bar.example4.de.", ""),
            Err(ValidationError::EmptyType)
        );
    }
}
