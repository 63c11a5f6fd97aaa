//! Paginated fetching from the WordPress REST API
//!
//! The fetcher builds collection and single-item URLs from the configured
//! base URL, applies pagination and ordering parameters, and decodes the
//! JSON responses into [`RemoteObject`]s. Page fetches are isolated: a
//! failed page is folded into an empty one, which is the page loop's
//! termination signal. Single-item fetches are not: their callers need to
//! tell a missing object apart from an exhausted collection.

use crate::cache::RunCache;
use crate::client::{FetchOptions, SourceClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{ObjectKind, OrderBy, Page, RemoteObject};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// REST route prefix shared by every WordPress installation
const SERVICE_PREFIX: &str = "wp-json/wp/v2";

/// Fetches one object kind from the source API
#[derive(Clone)]
pub struct Fetcher {
    client: Arc<dyn SourceClient>,
    config: Arc<Config>,
    kind: ObjectKind,
}

impl Fetcher {
    /// Create a fetcher for one object kind
    pub fn new(client: Arc<dyn SourceClient>, config: Arc<Config>, kind: ObjectKind) -> Fetcher {
        Fetcher {
            client,
            config,
            kind,
        }
    }

    /// The object kind this fetcher serves
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Collection URL for this kind (`<base>/wp-json/wp/v2/<resource>`)
    fn collection_url(&self) -> Result<String> {
        let base = self.config.validated_base_url()?;
        Ok(format!("{base}/{SERVICE_PREFIX}/{}", self.kind.resource()))
    }

    /// Single-item URL (`<collection>/<id>`)
    pub(crate) fn item_url(&self, id: u64) -> Result<String> {
        Ok(format!("{}/{id}", self.collection_url()?))
    }

    /// Fetch one collection page as raw records
    ///
    /// Applies the default page size when `per_page` is absent (floored at 1),
    /// floors `page` at 1, normalizes ordering options, and sets an
    /// `Accept: application/json` header unless the caller already did.
    ///
    /// An empty body, a non-array body, or the source's `code`/`message`
    /// error envelope all decode to "no records". Transport failures, error
    /// statuses, and undecodable bodies become [`Error::Fetch`] carrying the
    /// URL and the options in effect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid base URL and [`Error::Fetch`]
    /// for transport, status, or decode failures.
    pub async fn fetch_page(
        &self,
        page: u32,
        per_page: Option<u32>,
        options: &FetchOptions,
    ) -> Result<Vec<Value>> {
        let url = self.collection_url()?;
        let mut options = options.clone();

        let order = OrderBy::take_from(&mut options.query);
        order.apply(&mut options.query);

        options
            .headers
            .entry("Accept".to_string())
            .or_insert_with(|| "application/json".to_string());

        let per_page = per_page
            .unwrap_or_else(|| self.config.per_page_for(self.kind))
            .max(1);
        options
            .query
            .entry("per_page".to_string())
            .or_insert_with(|| per_page.to_string());
        options
            .query
            .entry("page".to_string())
            .or_insert_with(|| page.max(1).to_string());

        let response = self
            .client
            .get(&url, &options)
            .await
            .map_err(|error| Error::fetch(&url, &options, error))?;

        if response.status >= 400 {
            return Err(Error::fetch(
                &url,
                &options,
                format!("HTTP {}", response.status),
            ));
        }
        if response.body.is_empty() {
            return Ok(Vec::new());
        }

        let body = response
            .json()
            .map_err(|error| Error::fetch(&url, &options, error))?;

        match body {
            Value::Array(records) => Ok(records),
            Value::Object(map)
                if map.get("code").is_some_and(|v| !v.is_null())
                    || map.get("message").is_some_and(|v| !v.is_null()) =>
            {
                debug!(kind = %self.kind, page, "source returned an error envelope, no records");
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Fetch and parse one collection page, storing parsed objects in the
    /// run cache
    ///
    /// Fetch failures are swallowed into an empty page: to the page loop, a
    /// failed page looks identical to an exhausted one, so the loop
    /// terminates instead of retrying. The failure is logged at `warn!`
    /// since it is otherwise invisible to the caller.
    ///
    /// Records without a positive id are counted in [`Page::skipped`] rather
    /// than parsed.
    pub async fn get(
        &self,
        page: u32,
        per_page: Option<u32>,
        options: &FetchOptions,
        cache: &mut RunCache,
    ) -> Page {
        let records = match self.fetch_page(page, per_page, options).await {
            Ok(records) => records,
            Err(error) => {
                warn!(kind = %self.kind, page, %error, "page fetch failed, treating as exhausted");
                return Page::default();
            }
        };

        let mut result = Page::default();
        for record in records {
            match RemoteObject::parse(self.kind, record) {
                Some(object) => {
                    cache.store(&object.id().to_string(), self.kind, object.clone());
                    result.objects.push(object);
                }
                None => {
                    warn!(kind = %self.kind, page, "skipping record without a positive id");
                    result.skipped += 1;
                }
            }
        }
        result
    }

    /// Fetch a single item as a raw record
    ///
    /// Unlike the page path, failures here are NOT swallowed: an empty body,
    /// an error status, or a transport failure raises [`Error::Fetch`] so
    /// the caller can distinguish "not found" from "exhausted".
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid base URL and [`Error::Fetch`]
    /// for transport, status, decode, or empty-body failures.
    pub async fn fetch_one(&self, id: u64, options: &FetchOptions) -> Result<Value> {
        let url = self.item_url(id)?;
        let mut options = options.clone();
        options
            .headers
            .entry("Accept".to_string())
            .or_insert_with(|| "application/json".to_string());

        let response = self
            .client
            .get(&url, &options)
            .await
            .map_err(|error| Error::fetch(&url, &options, error))?;

        if response.status >= 400 {
            return Err(Error::fetch(
                &url,
                &options,
                format!("HTTP {}", response.status),
            ));
        }
        if response.body.is_empty() {
            return Err(Error::fetch(&url, &options, "empty body"));
        }

        response
            .json()
            .map_err(|error| Error::fetch(&url, &options, error))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
