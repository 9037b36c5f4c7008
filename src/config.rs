use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// How requests authenticate against the PowerDNS API.
#[derive(Clone, Default)]
pub enum Authentication {
    #[default]
    None,
    /// Sent as `X-API-Key`.
    ApiKey(String),
    Basic { username: String, password: String },
}

impl std::fmt::Debug for Authentication {
    // credentials stay out of logs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authentication::None => f.write_str("None"),
            Authentication::ApiKey(_) => f.write_str("ApiKey(***)"),
            Authentication::Basic { username, .. } => {
                write!(f, "Basic {{ username: {username:?}, password: *** }}")
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String, // e.g. "http://127.0.0.1:8081"
    pub auth: Authentication,
    pub request_timeout: Option<Duration>,
    pub readiness_poll_interval: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: Authentication::None,
            request_timeout: None,
            readiness_poll_interval: Duration::from_secs(1),
            user_agent: format!("pdns-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.auth = Authentication::ApiKey(key.into());
        self
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Authentication::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_readiness_poll_interval(mut self, interval: Duration) -> Self {
        self.readiness_poll_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.api_root()?;
        match &self.auth {
            Authentication::ApiKey(key) if key.is_empty() => {
                return Err(Error::config("API key is empty"));
            }
            Authentication::Basic { username, .. } if username.is_empty() => {
                return Err(Error::config("basic auth username is empty"));
            }
            _ => {}
        }
        if self.readiness_poll_interval.is_zero() {
            return Err(Error::config("readiness poll interval must be positive"));
        }
        Ok(())
    }

    /// API root URL: the base URL with `/api/v1` appended unless already present.
    pub fn api_root(&self) -> Result<Url> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::config("base URL is empty"));
        }
        let mut url = Url::parse(trimmed)
            .map_err(|e| Error::config(format!("invalid base URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            let msg = format!("unsupported base URL scheme '{}'", url.scheme());
            return Err(Error::Config(msg));
        }
        let Some(segments) = url.path_segments() else {
            let msg = format!("base URL '{trimmed}' cannot carry a path");
            return Err(Error::Config(msg));
        };
        let segments: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
        if !segments.ends_with(&API_PREFIX) {
            let mut path = url.path().trim_end_matches('/').to_string();
            for segment in API_PREFIX {
                path.push('/');
                path.push_str(segment);
            }
            url.set_path(&path);
        }
        Ok(url)
    }
}
