//! Content sink abstraction
//!
//! The destination repository owns persistent content creation and update;
//! the pipeline only constructs the mapping request and consumes the result.
//! Implementations decide create-vs-update by looking up the remote id, which
//! is what makes re-imports idempotent.

use crate::config::TypeConfig;
use crate::error::SinkError;
use crate::types::{RemoteObject, SinkContent};
use async_trait::async_trait;

/// Destination repository collaborator
///
/// One call maps one remote object into sink content. The sink must look up
/// existing content by `remote_id` and update it instead of creating a
/// duplicate; `update` signals whether the caller wants an existing item
/// refreshed or left as-is.
#[async_trait]
pub trait ContentSink: Send + Sync {
    /// Create new content for `object`, or update the content already bound
    /// to `remote_id`
    ///
    /// Returns `Ok(None)` when the sink declines to create the item (for
    /// example, a validation short-circuit upstream of persistence), a soft
    /// outcome distinct from the hard failures below.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] when the repository rejects the operation:
    /// field validation, authorization, a dangling reference, or content in
    /// a state that does not permit the update.
    async fn create_or_update_content(
        &self,
        object: &RemoteObject,
        values: &TypeConfig,
        remote_id: &str,
        parent_location_id: i64,
        update: bool,
    ) -> Result<Option<SinkContent>, SinkError>;
}
