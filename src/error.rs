//! Error types for wp-import
//!
//! This module provides the error handling for the library, including:
//! - The main [`Error`] type used by the fetch/map/import pipeline
//! - The [`SinkError`] taxonomy raised by [`ContentSink`](crate::sink::ContentSink)
//!   implementations
//! - Context information (request URL, request options, configuration key)

use crate::client::FetchOptions;
use crate::types::ObjectKind;
use thiserror::Error;

/// Result type alias for wp-import operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wp-import
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "source.base_url")
        key: Option<String>,
    },

    /// Page or single-item fetch failed (transport, HTTP status, or body decode)
    #[error("fetch failed for {url}: {reason}")]
    Fetch {
        /// The request URL that failed
        url: String,
        /// The request options in effect when the failure occurred
        options: FetchOptions,
        /// What went wrong (transport error, HTTP status, decode error)
        reason: String,
    },

    /// Single-item lookup found no usable remote object
    #[error("remote object not found: {url}")]
    NotFound {
        /// The single-item URL that was looked up
        url: String,
    },

    /// Sink rejected a content creation or update
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// A required sub-object could not be created as sink content
    #[error("cannot create {kind} {id} as sub-object content")]
    SubObject {
        /// The object kind being created
        kind: ObjectKind,
        /// The remote id of the object
        id: u64,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive writing failed during image export
    #[error("image export failed: {0}")]
    Export(#[from] zip::result::ZipError),
}

impl Error {
    /// Build a [`Error::Fetch`] carrying the request URL and options
    pub(crate) fn fetch(
        url: impl Into<String>,
        options: &FetchOptions,
        reason: impl std::fmt::Display,
    ) -> Self {
        Error::Fetch {
            url: url.into(),
            options: options.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised by [`ContentSink`](crate::sink::ContentSink) implementations
///
/// These mirror the failure modes of a content repository: a rejected field
/// payload, a missing permission, a dangling reference, or content in a state
/// that does not permit the requested operation.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Field validation rejected the content creation or update
    #[error("validation failed for {remote_id}: {reason}")]
    Validation {
        /// The remote id of the rejected content
        remote_id: String,
        /// Why validation failed
        reason: String,
    },

    /// The sink user lacks permission for the operation
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The sink could not resolve a referenced entity
    #[error("sink entity not found: {0}")]
    NotFound(String),

    /// Content is in a state that does not permit the operation
    #[error("bad state for {remote_id}: {reason}")]
    BadState {
        /// The remote id of the affected content
        remote_id: String,
        /// Why the operation is not permitted
        reason: String,
    },
}
