// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Aquarium Operator
//!
//! A Kubernetes operator that keeps `Aquarium` resources converged: each
//! `Aquarium` gets a placement `Namespace` and a `Deployment` at the requested
//! replica count, and its status reports whether every requested tank is ready.
//!
//! ## Modules
//!
//! - [`crd`] - The `Aquarium` Custom Resource Definition
//! - [`reconcilers`] - Reconciliation pass, desired-state builders and status bookkeeping
//! - [`store`] - Object store seam the reconciler reads and writes through
//! - [`selector`] - Routing of owned child events back to their `Aquarium`
//! - [`controller`] - Watch registration and requeue policy
//! - [`context`] - Shared controller context
//! - [`config`] - Command-line and environment configuration
//! - [`metrics`] - Prometheus metrics and the `/metrics` endpoint
//!
//! ## Example
//!
//! ```rust,no_run
//! use aquarium_operator::crd::{Aquarium, AquariumSpec};
//! use aquarium_operator::reconcilers::resources::build_deployment;
//!
//! let aquarium = Aquarium::new(
//!     "monterey",
//!     AquariumSpec {
//!         replica_count: 2,
//!         placement_namespace: "atlanta".to_string(),
//!         image: "busybox".to_string(),
//!     },
//! );
//! let deployment = build_deployment(&aquarium);
//! assert_eq!(deployment.spec.unwrap().replicas, Some(2));
//! ```

pub mod config;
pub mod constants;
pub mod context;
pub mod controller;
pub mod crd;
pub mod errors;
pub mod labels;
pub mod metrics;
pub mod reconcilers;
pub mod selector;
pub mod status_reasons;
pub mod store;
