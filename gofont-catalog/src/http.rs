//! Fetch collaborator used by providers for catalog snapshots and font files.

use crate::error::CatalogError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Global timeout for all HTTP operations (30 seconds).
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum response body size for catalog API responses (10 MB).
pub const MAX_CATALOG_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum response body size for font file downloads (50 MB).
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// Fetch bytes for a URL.
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, reading at most `limit` bytes of body.
    fn fetch(&self, url: &str, limit: u64) -> Result<Vec<u8>, CatalogError>;
}

/// Rewrite a plain `http:` URL to `https:`; other URLs are returned unchanged.
pub fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http:") {
        Some(rest) => format!("https:{rest}"),
        None => url.to_string(),
    }
}

/// Validate that a URL parses and uses an HTTP(S) scheme.
pub fn validate_url(url: &str) -> Result<url::Url, CatalogError> {
    let parsed = url::Url::parse(url).map_err(|e| CatalogError::network(url, e))?;
    match parsed.scheme() {
        "https" => Ok(parsed),
        "http" => {
            log::warn!("Fetching over insecure HTTP: {}", url);
            Ok(parsed)
        }
        scheme => Err(CatalogError::network(
            url,
            format!("unsupported URL scheme '{scheme}'"),
        )),
    }
}

/// Create a new HTTP agent configured with native-tls and a global timeout.
pub fn agent() -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(HTTP_TIMEOUT))
        .build()
        .into()
}

/// [`Fetcher`] backed by a `ureq` agent.
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self { agent: agent() }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, limit: u64) -> Result<Vec<u8>, CatalogError> {
        validate_url(url)?;
        log::debug!("GET {}", url);

        self.agent
            .get(url)
            .header("User-Agent", "gofont")
            .call()
            .map_err(|e| CatalogError::network(url, e))?
            .into_body()
            .with_config()
            .limit(limit)
            .read_to_vec()
            .map_err(|e| CatalogError::network(url, format!("failed to read body: {e}")))
    }
}

/// [`Fetcher`] serving canned responses from memory.
///
/// Unknown URLs fail with a `Network` error. Every requested URL is recorded.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str, limit: u64) -> Result<Vec<u8>, CatalogError> {
        self.requests.lock().push(url.to_string());
        match self.responses.get(url) {
            Some(body) if body.len() as u64 > limit => Err(CatalogError::network(
                url,
                format!("body exceeds {limit} bytes"),
            )),
            Some(body) => Ok(body.clone()),
            None => Err(CatalogError::network(url, "no response registered")),
        }
    }
}
