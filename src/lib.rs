//! Typed async client for the PowerDNS Authoritative HTTP API.
//!
//! Every resource family has its own service struct built from a shared
//! [`PowerDnsClient`] transport; [`Client`] hands them out. All calls take a
//! [`CallContext`] that carries cancellation and an optional deadline.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use pdns_client::{CallContext, Client, ClientConfig};
//! use pdns_client::zones::{ResourceRecordSet, ZoneFetchOptions};
//!
//! # async fn example() -> pdns_client::Result<()> {
//! let client = Client::new(ClientConfig::new("http://localhost:8081").with_api_key("secret"))?;
//! let ctx = CallContext::with_timeout(Duration::from_secs(10));
//! client.wait_until_up(&ctx).await?;
//!
//! let zones = client.zones();
//! zones
//!     .add_record_set(
//!         &ctx,
//!         "localhost",
//!         "example.de.",
//!         ResourceRecordSet::new("bar.example.de.", "A", 60, ["127.0.0.2"]),
//!     )
//!     .await?;
//! let options = ZoneFetchOptions::filtered("bar.example.de.", "A")?;
//! let zone = zones
//!     .get_zone(&ctx, "localhost", "example.de.", &options)
//!     .await?;
//! assert!(zone.find_rrset("bar.example.de.", "A").is_some());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod cryptokeys;
pub mod error;
pub mod metadata;
pub mod networks;
pub mod powerdns;
pub mod search;
pub mod servers;
pub mod tsigkeys;
pub mod validation;
pub mod views;
pub mod zones;

pub use config::{Authentication, ClientConfig};
pub use context::CallContext;
pub use error::{Error, Result};
pub use powerdns::PowerDnsClient;

use std::time::Duration;

use tracing::{debug, info};

use cache::CacheClient;
use cryptokeys::CryptokeysClient;
use metadata::MetadataClient;
use networks::NetworksClient;
use search::SearchClient;
use servers::ServersClient;
use tsigkeys::TsigKeysClient;
use views::ViewsClient;
use zones::ZonesClient;

/// Root client. Cheap to clone; the services it returns share its transport.
#[derive(Clone)]
pub struct Client {
    transport: PowerDnsClient,
    poll_interval: Duration,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = PowerDnsClient::new(&config)?;
        Ok(Self {
            transport,
            poll_interval: config.readiness_poll_interval,
        })
    }

    /// Build on a caller-configured reqwest client (TLS client certs, proxies).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        let transport = PowerDnsClient::with_http_client(&config, http)?;
        Ok(Self {
            transport,
            poll_interval: config.readiness_poll_interval,
        })
    }

    pub fn transport(&self) -> &PowerDnsClient {
        &self.transport
    }

    /// One reachability probe. Authentication is not verified.
    pub async fn status(&self, ctx: &CallContext) -> Result<()> {
        self.transport.probe(ctx).await
    }

    /// Block until the API answers HTTP requests, polling at the configured
    /// interval. Returns `Canceled` or `DeadlineExceeded` when the context
    /// ends first, even in the middle of a probe.
    pub async fn wait_until_up(&self, ctx: &CallContext) -> Result<()> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.status(ctx).await {
                Ok(()) => {
                    info!(attempt, url = %self.transport.api_root(), "PowerDNS API is up");
                    return Ok(());
                }
                Err(err) if err.is_cancellation() => return Err(err),
                Err(err) => {
                    debug!(attempt, error = %err, "PowerDNS API not reachable yet");
                }
            }
            ctx.sleep(self.poll_interval).await?;
        }
    }

    pub fn servers(&self) -> ServersClient {
        ServersClient::new(self.transport.clone())
    }

    pub fn zones(&self) -> ZonesClient {
        ZonesClient::new(self.transport.clone())
    }

    pub fn search(&self) -> SearchClient {
        SearchClient::new(self.transport.clone())
    }

    pub fn cache(&self) -> CacheClient {
        CacheClient::new(self.transport.clone())
    }

    pub fn cryptokeys(&self) -> CryptokeysClient {
        CryptokeysClient::new(self.transport.clone())
    }

    pub fn metadata(&self) -> MetadataClient {
        MetadataClient::new(self.transport.clone())
    }

    pub fn tsig_keys(&self) -> TsigKeysClient {
        TsigKeysClient::new(self.transport.clone())
    }

    pub fn views(&self) -> ViewsClient {
        ViewsClient::new(self.transport.clone())
    }

    pub fn networks(&self) -> NetworksClient {
        NetworksClient::new(self.transport.clone())
    }
}
