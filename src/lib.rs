//! # wp-import
//!
//! Backend library for importing WordPress content into a CMS repository.
//!
//! ## Design Philosophy
//!
//! wp-import is designed to be:
//! - **Idempotent** - Re-running an import updates existing content instead
//!   of duplicating it, keyed by a composite remote id
//! - **Batch-tolerant** - One bad record never blocks the rest of the
//!   import; failures land in the logs, not in the exit path
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Sink-agnostic** - The destination repository is a trait; the crate
//!   never assumes a particular CMS
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use wp_import::{Config, Fetcher, FetchOptions, HttpSourceClient, ObjectKind, RunCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.source.base_url = "https://blog.example.com".to_string();
//!     config.post.content_type = "blog_post".to_string();
//!     config.post.parent_location = Some(2);
//!
//!     let client = Arc::new(HttpSourceClient::new()?);
//!     let fetcher = Fetcher::new(client, Arc::new(config), ObjectKind::Post);
//!
//!     let mut cache = RunCache::new();
//!     let page = fetcher.get(1, None, &FetchOptions::new(), &mut cache).await;
//!     println!("fetched {} posts", page.objects.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! To run a full import, implement [`ContentSink`] for your repository and
//! drive an [`Importer`]; see `demos/import_posts.rs` for a complete wiring.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Per-run object cache
pub mod cache;
/// HTTP transport abstraction
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Bulk image export
pub mod export;
/// Paginated source fetching
pub mod fetcher;
/// Import orchestration
pub mod importer;
/// Remote-object to sink-content mapping
pub mod mapper;
/// Content sink abstraction
pub mod sink;
/// Core types
pub mod types;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use cache::RunCache;
pub use client::{FetchOptions, HttpSourceClient, SourceClient, SourceResponse};
pub use config::{Config, ImageConfig, SourceConfig, TypeConfig};
pub use error::{Error, Result, SinkError};
pub use export::AssetExporter;
pub use fetcher::Fetcher;
pub use importer::{ImportOptions, Importer};
pub use mapper::Mapper;
pub use sink::ContentSink;
pub use types::{
    Direction, ImportResult, ObjectKind, OrderBy, Page, RemoteObject, SinkContent,
};
