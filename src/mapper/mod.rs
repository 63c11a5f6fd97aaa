//! Mapping remote objects into sink content
//!
//! The mapper owns the create-or-update decision surface: it computes the
//! composite remote id that makes re-imports idempotent, resolves the sink
//! parent location from configuration, and delegates persistence to the
//! [`ContentSink`]. Single objects are resolved cache-first through
//! [`Mapper::get_or_create`], so one run never fetches the same record
//! twice.

use crate::cache::RunCache;
use crate::client::FetchOptions;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::sink::ContentSink;
use crate::types::{RemoteObject, SinkContent};
use std::sync::Arc;
use tracing::{debug, info};

/// Maps one object kind into sink content
#[derive(Clone)]
pub struct Mapper {
    fetcher: Fetcher,
    sink: Arc<dyn ContentSink>,
    config: Arc<Config>,
}

impl Mapper {
    /// Create a mapper for the fetcher's object kind
    pub fn new(fetcher: Fetcher, sink: Arc<dyn ContentSink>, config: Arc<Config>) -> Mapper {
        Mapper {
            fetcher,
            sink,
            config,
        }
    }

    /// Resolve a remote object by id, cache-first
    ///
    /// Unless `force` is set, a cached object is returned without touching
    /// the source. On a cache miss the single-item path is fetched, parsed,
    /// and stored in the cache before returning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] carrying the lookup URL when the fetch
    /// fails, returns an empty body, or yields a malformed record.
    pub async fn get_or_create(
        &self,
        id: u64,
        force: bool,
        cache: &mut RunCache,
    ) -> Result<RemoteObject> {
        let kind = self.fetcher.kind();
        if !force
            && let Some(object) = cache.load(&id.to_string(), kind)
        {
            debug!(kind = %kind, id, "serving object from run cache");
            return Ok(object.clone());
        }

        let url = self.fetcher.item_url(id)?;
        let record = self
            .fetcher
            .fetch_one(id, &FetchOptions::new())
            .await
            .map_err(|error| {
                debug!(kind = %kind, id, %error, "single-item fetch failed");
                Error::NotFound { url: url.clone() }
            })?;

        let object = RemoteObject::parse(kind, record).ok_or(Error::NotFound { url })?;
        cache.store(&object.id().to_string(), kind, object.clone());
        Ok(object)
    }

    /// Map a remote object into sink content
    ///
    /// Computes the remote id (`"<datatype>-<id>"`), resolves the parent
    /// location for the object's kind, and delegates to the sink, which
    /// decides create-vs-update by remote-id lookup. `Ok(None)` means the
    /// sink declined to create the item; sink failures propagate untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no parent location is configured for
    /// the kind (a fatal precondition, not a per-item failure) and
    /// [`Error::Sink`] when the sink rejects the operation.
    pub async fn map_to_content(
        &self,
        object: &RemoteObject,
        update: bool,
    ) -> Result<Option<SinkContent>> {
        let kind = object.kind();
        let values = self.config.kind(kind);
        let remote_id = object.remote_id();
        let parent_location_id = values.parent_location.ok_or_else(|| Error::Config {
            message: format!("parent_location is not configured for {kind}"),
            key: Some(format!("{kind}.parent_location")),
        })?;

        let content = self
            .sink
            .create_or_update_content(object, values, &remote_id, parent_location_id, update)
            .await?;

        if let Some(content) = &content {
            info!(
                name = %content.name,
                id = content.id,
                remote_id = %content.remote_id,
                "created content"
            );
        }
        Ok(content)
    }

    /// Resolve an object and map it as a required dependency of other content
    ///
    /// Used where the referenced object must exist (a post's author, its
    /// featured media), so neither a missing object nor a declining sink is
    /// tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the object cannot be resolved and
    /// [`Error::SubObject`] when the sink yields no content for it.
    pub async fn create_as_sub_object(
        &self,
        id: u64,
        update: bool,
        cache: &mut RunCache,
    ) -> Result<SinkContent> {
        let object = self.get_or_create(id, false, cache).await?;
        let content = self.map_to_content(&object, update).await?;
        content.ok_or(Error::SubObject {
            kind: self.fetcher.kind(),
            id,
        })
    }
}
