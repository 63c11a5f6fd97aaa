//! Import orchestration
//!
//! One [`Importer`] drives the whole pipeline for one object kind: clear the
//! run cache, page through the source until a fetch comes back empty, map
//! each object into the sink, optionally export cached images, clear the
//! cache again, and report the tally. Pages and objects are processed
//! strictly in source order, one at a time, so the final counts are
//! deterministic and no record is mapped twice in a run.
//!
//! Failure policy: a failed page ends the run quietly (the fetcher folds it
//! into an empty page); a failed object is logged and skipped without
//! touching the rest of its page; a configuration failure aborts the run.

use crate::cache::RunCache;
use crate::client::{FetchOptions, SourceClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::AssetExporter;
use crate::fetcher::Fetcher;
use crate::mapper::Mapper;
use crate::sink::ContentSink;
use crate::types::{ImportResult, ObjectKind};
use std::sync::Arc;
use tracing::{error, info};

/// Options controlling a single import run
#[derive(Clone, Debug, Default)]
pub struct ImportOptions {
    /// Export the run's locally cached images as a zip archive at the end
    pub export_images: bool,

    /// Extra request options (headers, query, ordering) applied to every
    /// page fetch
    pub fetch: FetchOptions,
}

/// Drives the fetch → map → sink pipeline for one object kind
pub struct Importer {
    fetcher: Fetcher,
    mapper: Mapper,
    exporter: AssetExporter,
    config: Arc<Config>,
    cache: RunCache,
}

impl Importer {
    /// Wire an importer for one object kind
    pub fn new(
        client: Arc<dyn SourceClient>,
        sink: Arc<dyn ContentSink>,
        config: Arc<Config>,
        kind: ObjectKind,
    ) -> Importer {
        let fetcher = Fetcher::new(client, config.clone(), kind);
        let mapper = Mapper::new(fetcher.clone(), sink, config.clone());
        let exporter = AssetExporter::new(config.clone());
        Importer {
            fetcher,
            mapper,
            exporter,
            config,
            cache: RunCache::new(),
        }
    }

    /// The object kind this importer serves
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.fetcher.kind()
    }

    /// Run one import from the first requested page until the source is
    /// exhausted
    ///
    /// `per_page` is kept only when positive; `page` defaults to 1 and a
    /// negative value is coerced to its absolute value, never rejected. The
    /// run cache is cleared at start and end, so nothing carries over
    /// between runs.
    ///
    /// The returned tally counts every record the source returned (`total`)
    /// against the objects the sink accepted without error (`success`);
    /// per-object failures are only visible in the logs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid base URL or a kind without a
    /// configured parent location. Everything else is folded into the tally.
    pub async fn import(
        &mut self,
        per_page: Option<u32>,
        page: Option<i32>,
        options: &ImportOptions,
    ) -> Result<ImportResult> {
        self.cache.clear_all();
        self.config.validated_base_url()?;

        let per_page = per_page.filter(|&value| value > 0);
        let mut page = page.unwrap_or(1).unsigned_abs();
        let mut total: u64 = 0;
        let mut success: u64 = 0;

        loop {
            let batch = self
                .fetcher
                .get(page, per_page, &options.fetch, &mut self.cache)
                .await;
            if batch.is_empty() {
                break;
            }
            total += batch.record_count() as u64;

            for object in &batch.objects {
                match self.mapper.map_to_content(object, false).await {
                    Ok(_) => success += 1,
                    Err(err @ Error::Config { .. }) => {
                        self.cache.clear_all();
                        return Err(err);
                    }
                    Err(err) => {
                        error!(
                            kind = %object.kind(),
                            object_id = object.id(),
                            %err,
                            "object import failed"
                        );
                    }
                }
            }

            info!(kind = %self.kind(), page, "page imported");
            page += 1;
        }

        if options.export_images {
            self.exporter.export_images();
        }

        self.cache.clear_all();
        info!(kind = %self.kind(), total, success, "import finished");
        Ok(ImportResult { success, total })
    }
}
