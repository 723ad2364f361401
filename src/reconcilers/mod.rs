// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation logic for `Aquarium` resources.
//!
//! # Reconciliation Architecture
//!
//! The operator follows the standard Kubernetes controller pattern:
//!
//! 1. **Observe** - Read the `Aquarium` and its child `Deployment`
//! 2. **Status** - Report the observed health back onto the `Aquarium`
//! 3. **Reconcile** - Ensure the placement `Namespace` exists
//! 4. **Apply** - Server-side apply the desired `Deployment`
//!
//! # Modules
//!
//! - [`aquarium`] - The reconciliation pass itself
//! - [`resources`] - Pure builders for the owned objects
//! - [`status`] - Health classification and condition bookkeeping
//! - [`retry`] - Per-aquarium error backoff
//!
//! # Example: Running a Pass
//!
//! ```rust,no_run
//! use aquarium_operator::reconcilers::reconcile_aquarium;
//! use aquarium_operator::store::KubeStore;
//! use kube::Client;
//!
//! async fn reconcile_one() -> anyhow::Result<()> {
//!     let store = KubeStore::new(Client::try_default().await?, "aquarium-operator");
//!     let outcome = reconcile_aquarium(&store, "aquarium", "monterey").await?;
//!     println!("health: {:?}", outcome.health);
//!     Ok(())
//! }
//! ```

pub mod aquarium;
pub mod resources;
pub mod retry;
pub mod status;

pub use aquarium::{reconcile_aquarium, ReconcileOutcome, StatusWrite};
