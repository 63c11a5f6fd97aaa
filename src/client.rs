//! HTTP transport abstraction for the source API
//!
//! The pipeline issues all requests through the [`SourceClient`] trait so the
//! transport (auth, proxies, timeouts) stays swappable and tests can run
//! against mock servers or in-memory clients. [`HttpSourceClient`] is the
//! default implementation on `reqwest`; it owns the request timeout, since
//! the pipeline itself applies none.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Request timeout applied by the default client
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Headers and query parameters for one request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Request headers by name
    pub headers: BTreeMap<String, String>,
    /// Query parameters by name
    pub query: BTreeMap<String, String>,
}

impl FetchOptions {
    /// Empty options
    #[must_use]
    pub fn new() -> FetchOptions {
        FetchOptions::default()
    }
}

/// Raw response from the source
#[derive(Clone, Debug)]
pub struct SourceResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl SourceResponse {
    /// Decode the body as JSON
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Transport collaborator: issues GET requests against the source API
///
/// Implementations must surface every transport-level failure as an error;
/// the fetcher treats any error from this trait uniformly as a fetch
/// failure. Non-success HTTP statuses are returned as data, not errors;
/// status handling belongs to the fetcher.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Issue a GET request with the given headers and query parameters
    async fn get(&self, url: &str, options: &FetchOptions) -> Result<SourceResponse>;
}

/// Default `reqwest`-backed source client
pub struct HttpSourceClient {
    client: reqwest::Client,
}

impl HttpSourceClient {
    /// Create a client with the default timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<HttpSourceClient> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("wp-import/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpSourceClient { client })
    }
}

#[async_trait]
impl SourceClient for HttpSourceClient {
    async fn get(&self, url: &str, options: &FetchOptions) -> Result<SourceResponse> {
        let mut request = self.client.get(url);
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if !options.query.is_empty() {
            let query: Vec<(&String, &String)> = options.query.iter().collect();
            request = request.query(&query);
        }

        let response = request.send().await.map_err(Error::Network)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Error::Network)?.to_vec();

        Ok(SourceResponse { status, body })
    }
}
