// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared context for the `Aquarium` controller.
//!
//! The controller hands every reconciliation an `Arc<Context>` containing:
//! - the object store the reconciler reads and writes through
//! - the operator configuration
//! - the per-aquarium error backoff state

use crate::config::OperatorConfig;
use crate::reconcilers::retry::ErrorBackoffs;
use crate::store::ObjectStore;
use std::sync::Arc;

/// Shared context passed to every reconciliation.
#[derive(Clone)]
pub struct Context {
    pub store: Arc<dyn ObjectStore>,

    pub config: OperatorConfig,

    /// Consecutive-failure backoff, keyed by `namespace/name`
    pub backoffs: Arc<ErrorBackoffs>,
}

impl Context {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, config: OperatorConfig) -> Self {
        let backoffs = Arc::new(ErrorBackoffs::new(config.error_backoff_max()));
        Self {
            store,
            config,
            backoffs,
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod context_tests;
