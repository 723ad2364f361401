// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for object store access and reconciliation.
//!
//! Not-found and already-exists responses are expected states and never reach
//! these types: the store maps them to `Ok(None)` and `Ok(false)` respectively.
//! Everything here is propagated to the controller, which retries with backoff.

use thiserror::Error;

/// Errors surfaced by the object store seam and the reconciler.
#[derive(Error, Debug)]
pub enum Error {
    /// Any Kubernetes API failure other than the expected not-found/conflict cases
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Failed to turn a typed object into its JSON apply payload
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The object lacks metadata the controller needs (name, namespace, uid)
    #[error("{kind} is missing metadata.{field}")]
    MissingMetadata {
        /// Kind of the offending object
        kind: &'static str,
        /// Name of the missing metadata field
        field: &'static str,
    },

    /// The object store could not serve the request
    #[error("Object store unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Shorthand for [`Error::MissingMetadata`].
    #[must_use]
    pub fn missing(kind: &'static str, field: &'static str) -> Self {
        Error::MissingMetadata { kind, field }
    }
}

/// Result alias used across the store and reconcilers.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns true when a kube error is an API response with the given HTTP status code.
#[must_use]
pub fn is_api_status(err: &kube::Error, code: u16) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == code)
}
