use url::Url;

use crate::error::{Error, Result};

/// Request path below the API root, kept as raw segments.
///
/// Each segment is percent-escaped on its own when the URL is built, so a
/// zone ID or network like `203.0.113.0/24` stays one segment (`%2F`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl ApiPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// `/servers/{server_id}`
    pub fn server(server_id: &str) -> Self {
        Self::root().push("servers").push(server_id)
    }

    /// `/servers/{server_id}/zones/{zone_id}`
    pub fn zone(server_id: &str, zone_id: &str) -> Self {
        Self::server(server_id).push("zones").push(zone_id)
    }

    pub fn push(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }

    pub fn resolve(&self, root: &Url) -> Result<Url> {
        let mut url = root.clone();
        {
            let Ok(mut segments) = url.path_segments_mut() else {
                let msg = format!("API root '{root}' cannot carry a path");
                return Err(Error::Config(msg));
            };
            segments.pop_if_empty();
            for segment in &self.segments {
                segments.push(segment);
            }
        }
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Url {
        Url::parse("http://localhost:8081/api/v1").unwrap()
    }

    #[test]
    fn test_zone_path() {
        let url = ApiPath::zone("localhost", "example.de.")
            .resolve(&root())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/api/v1/servers/localhost/zones/example.de."
        );
    }

    #[test]
    fn test_segments_escaped_independently() {
        let url = ApiPath::server("localhost")
            .push("networks")
            .push("203.0.113.0/24")
            .resolve(&root())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/api/v1/servers/localhost/networks/203.0.113.0%2F24"
        );
    }

    #[test]
    fn test_segment_with_reserved_characters() {
        let url = ApiPath::zone("local host", "a?b#c.")
            .resolve(&root())
            .unwrap();
        assert_eq!(url.path(), "/api/v1/servers/local%20host/zones/a%3Fb%23c.");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_query_pairs_are_encoded() {
        let url = ApiPath::zone("localhost", "example.de.")
            .query("rrset_name", "bar example.de.")
            .query("rrset_type", "TXT")
            .resolve(&root())
            .unwrap();
        assert_eq!(
            url.query(),
            Some("rrset_name=bar+example.de.&rrset_type=TXT")
        );
    }

    #[test]
    fn test_root_with_trailing_slash() {
        let root = Url::parse("http://localhost:8081/api/v1/").unwrap();
        let url = ApiPath::server("localhost").resolve(&root).unwrap();
        assert_eq!(url.path(), "/api/v1/servers/localhost");
    }
}
