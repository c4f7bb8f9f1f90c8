//! Error types and result aliases for facet.
//!
//! This module defines the shared error taxonomy used across all facet
//! components. Fatal errors abort before any write is issued; branch-local
//! errors are caught by the hierarchy walker and turned into skipped
//! branches. Per-entry attachment failures are not errors at all — they are
//! recorded as results and aggregated into the run report.

use std::fmt;

/// The result type used throughout facet.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving aspects or walking the hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller-supplied configuration or scope is invalid.
    #[error("configuration error: {message}")]
    Config {
        /// Description of what made the input invalid.
        message: String,
    },

    /// The aspect selection expanded to identifiers absent from the catalog.
    #[error("unknown aspects: {} (available: {})", ids.join(", "), available.join(", "))]
    UnknownAspects {
        /// Every unresolvable identifier, in expansion order.
        ids: Vec<String>,
        /// The identifiers the catalog does define.
        available: Vec<String>,
    },

    /// The requested resource was not found.
    #[error("not found: {resource_type} {id}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// An HTTP request could not be issued or returned a non-success status.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An asset's underlying resource path did not parse.
    #[error("invalid resource path: {path}")]
    InvalidResource {
        /// The path string that failed to parse.
        path: String,
    },

    /// A document could not be serialized or deserialized.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error with the given message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a new transport error with the given message.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a source cause.
    #[must_use]
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new resource not found error.
    #[must_use]
    pub fn resource_not_found(resource_type: &'static str, id: impl fmt::Display) -> Self {
        Self::ResourceNotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a new serialization error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Returns true if this error means a looked-up resource is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}
