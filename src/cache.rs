//! Per-run object cache
//!
//! Fetched remote objects are cached for the duration of one import run so
//! that sub-object resolution (a post's author, its featured media) never
//! refetches a record the page loop already saw. The cache is an explicit
//! context value passed by reference into fetch and mapper calls; the
//! orchestrator clears it at run start and run end, so no state leaks
//! between runs and nothing grows unbounded in a long-lived process.

use crate::types::{ObjectKind, RemoteObject};
use std::collections::HashMap;

/// Run-scoped store of fetched remote objects, keyed by id and kind
#[derive(Debug, Default)]
pub struct RunCache {
    entries: HashMap<(String, ObjectKind), RemoteObject>,
}

impl RunCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> RunCache {
        RunCache::default()
    }

    /// Upsert an object under `(id, kind)`
    ///
    /// Insertion is an idempotent overwrite; storing the same key twice
    /// keeps the latest object.
    pub fn store(&mut self, id: &str, kind: ObjectKind, object: RemoteObject) {
        self.entries.insert((id.to_string(), kind), object);
    }

    /// Pure lookup; never triggers a fetch
    #[must_use]
    pub fn load(&self, id: &str, kind: ObjectKind) -> Option<&RemoteObject> {
        self.entries.get(&(id.to_string(), kind))
    }

    /// Drop all entries
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Number of cached objects
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
