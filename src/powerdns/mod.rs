//! HTTP plumbing for the PowerDNS API: path building and the request transport.

pub mod client;
pub mod path;

pub use client::PowerDnsClient;
pub use path::ApiPath;
