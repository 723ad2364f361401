// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Object store seam used by the reconciler.
//!
//! The reconciler never talks to `kube::Api` directly. It goes through
//! [`ObjectStore`], which has one production implementation ([`KubeStore`]) and an
//! in-memory implementation used by unit tests.
//!
//! Expected states are part of the contract rather than errors:
//!
//! - `get_*` return `Ok(None)` when the object does not exist
//! - `create_namespace` returns `Ok(false)` when the namespace already exists

use crate::crd::{Aquarium, AquariumStatus};
use crate::errors::Result;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;

pub mod kube_store;

#[cfg(test)]
pub mod memory;

pub use kube_store::KubeStore;

/// Typed access to the objects an `Aquarium` reconciliation touches.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an `Aquarium` by key, `None` if it has been deleted.
    async fn get_aquarium(&self, namespace: &str, name: &str) -> Result<Option<Aquarium>>;

    /// Fetch the child `Deployment`, `None` if it has not been created yet.
    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Option<Deployment>>;

    /// Write `status` onto `aquarium`, guarded by the `resourceVersion` it was read at.
    async fn patch_aquarium_status(&self, aquarium: &Aquarium, status: &AquariumStatus)
        -> Result<()>;

    /// Create the namespace. Returns `false` if it already existed.
    async fn create_namespace(&self, namespace: &Namespace) -> Result<bool>;

    /// Server-side apply of a `Deployment` payload. The payload must not carry `status`.
    async fn apply_deployment(
        &self,
        namespace: &str,
        name: &str,
        payload: &serde_json::Value,
    ) -> Result<()>;
}
