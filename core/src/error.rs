//! Error types for endpoint resolution.
//!
//! # Design
//! Both resolution failures are local and deterministic: retrying with the
//! same inputs yields the same error. `ArityMismatch` carries the fully
//! concatenated template so the offending declaration can be found from the
//! message alone.

use thiserror::Error;

/// Errors returned while resolving an endpoint into a URI or request.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The number of positional arguments differs from the number of
    /// placeholder occurrences in the template.
    #[error("failed to format '{template}': expected {expected} arguments, {actual} provided")]
    ArityMismatch {
        expected: usize,
        actual: usize,
        template: String,
    },

    /// The expanded string is not an absolute, hierarchical URI.
    #[error("invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
