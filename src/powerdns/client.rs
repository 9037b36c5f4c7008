use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::{Authentication, ClientConfig};
use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::powerdns::path::ApiPath;

/// Low-level PowerDNS HTTP transport shared by all API services.
///
/// Cloning is cheap; the reqwest connection pool is reference counted.
#[derive(Clone)]
pub struct PowerDnsClient {
    http: Client,
    api_root: Url, // e.g. "http://127.0.0.1:8081/api/v1"
    auth: Authentication,
}

impl PowerDnsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http_client(config, builder.build()?)
    }

    /// Use a caller-built reqwest client (TLS client certificates, proxies, ...).
    pub fn with_http_client(config: &ClientConfig, http: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http,
            api_root: config.api_root()?,
            auth: config.auth.clone(),
        })
    }

    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Authentication::None => req,
            Authentication::ApiKey(key) => req.header("X-API-Key", key),
            Authentication::Basic { username, password } => {
                req.basic_auth(username, Some(password))
            }
        }
    }

    pub fn url(&self, path: &ApiPath) -> Result<Url> {
        path.resolve(&self.api_root)
    }

    /// Send one request and return the body of a 2xx response.
    ///
    /// The context is checked before anything is sent and raced against both
    /// the send and the body read.
    async fn execute(
        &self,
        ctx: &CallContext,
        method: Method,
        path: &ApiPath,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let url = self.url(path)?;
        let mut req = self
            .auth_header(self.http.request(method.clone(), url.clone()))
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        debug!(method = %method, url = %url, "PowerDNS API request");

        ctx.run(async {
            let res = req.send().await?;
            let status = res.status();
            let bytes = res.bytes().await?;
            let code = status.as_u16();
            debug!(method = %method, url = %url, status = code, "PowerDNS API response");
            if !status.is_success() {
                let body = String::from_utf8_lossy(&bytes).trim().to_string();
                return Err(Error::from_status(code, url.as_str(), body));
            }
            Ok(bytes.to_vec())
        })
        .await
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Option<Vec<u8>>> {
        Ok(Some(serde_json::to_vec(body)?))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, ctx: &CallContext, path: &ApiPath) -> Result<T> {
        let bytes = self.execute(ctx, Method::GET, path, None).await?;
        Self::decode(&bytes)
    }

    /// GET a non-JSON body, e.g. a zone export. Invalid UTF-8 is an error.
    pub async fn get_text(&self, ctx: &CallContext, path: &ApiPath) -> Result<String> {
        let bytes = self.execute(ctx, Method::GET, path, None).await?;
        Ok(String::from_utf8(bytes)?)
    }

    pub async fn post<B, T>(&self, ctx: &CallContext, path: &ApiPath, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        let bytes = self.execute(ctx, Method::POST, path, body).await?;
        Self::decode(&bytes)
    }

    pub async fn post_empty<B>(&self, ctx: &CallContext, path: &ApiPath, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = Self::encode(body)?;
        self.execute(ctx, Method::POST, path, body).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, ctx: &CallContext, path: &ApiPath, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        let bytes = self.execute(ctx, Method::PUT, path, body).await?;
        Self::decode(&bytes)
    }

    pub async fn put_empty<B>(&self, ctx: &CallContext, path: &ApiPath, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = Self::encode(body)?;
        self.execute(ctx, Method::PUT, path, body).await?;
        Ok(())
    }

    /// PUT without a request body that still answers with JSON (notify,
    /// rectify, cache flush).
    pub async fn put_for<T>(&self, ctx: &CallContext, path: &ApiPath) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.execute(ctx, Method::PUT, path, None).await?;
        Self::decode(&bytes)
    }

    pub async fn patch_empty<B>(&self, ctx: &CallContext, path: &ApiPath, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = Self::encode(body)?;
        self.execute(ctx, Method::PATCH, path, body).await?;
        Ok(())
    }

    pub async fn delete(&self, ctx: &CallContext, path: &ApiPath) -> Result<()> {
        self.execute(ctx, Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Reachability check: any HTTP answer from the API root counts, including
    /// 401, so credentials are not verified here.
    pub async fn probe(&self, ctx: &CallContext) -> Result<()> {
        let req = self.auth_header(self.http.get(self.api_root.clone()));
        ctx.run(async {
            let res = req.send().await?;
            let code = res.status().as_u16();
            debug!(url = %self.api_root, status = code, "PowerDNS API probe");
            Ok(())
        })
        .await
    }
}
