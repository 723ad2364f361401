// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the Aquarium operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for the `Aquarium` CRD
pub const API_GROUP: &str = "fun.tydanny.com";

/// API version for the `Aquarium` CRD
pub const API_VERSION: &str = "v1alpha1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "fun.tydanny.com/v1alpha1";

/// Kind name for `Aquarium` resource
pub const KIND_AQUARIUM: &str = "Aquarium";

// ============================================================================
// Server-Side Apply
// ============================================================================

/// Field owner recorded against every field this controller applies
pub const FIELD_MANAGER: &str = "aquarium-operator";

// ============================================================================
// Desired-State Defaults
// ============================================================================

/// Placement namespace used when the spec leaves it empty
pub const DEFAULT_PLACEMENT_NAMESPACE: &str = "pier39";

/// Name of the single container in every aquarium pod
pub const CONTAINER_NAME_AQUARIUM: &str = "aquarium";

/// Long-lived placeholder command standing in for a real workload
pub const PLACEHOLDER_COMMAND: [&str; 2] = ["sleep", "10000"];

// ============================================================================
// Controller Scheduling Constants
// ============================================================================

/// Resync interval after a successful reconciliation (5 minutes)
pub const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 300;

/// Maximum number of aquaria reconciled concurrently
pub const DEFAULT_CONCURRENCY: u16 = 4;

/// First requeue delay after a failed reconciliation
pub const ERROR_BACKOFF_INITIAL_SECS: u64 = 1;

/// Upper bound for the per-aquarium error backoff (5 minutes)
pub const ERROR_BACKOFF_MAX_SECS: u64 = 300;

/// Growth factor applied to the error backoff after every consecutive failure
pub const ERROR_BACKOFF_MULTIPLIER: u32 = 2;

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;

// ============================================================================
// Metrics Server Constants
// ============================================================================

/// Port for Prometheus metrics HTTP server
pub const METRICS_SERVER_PORT: u16 = 8080;

/// Path for Prometheus metrics endpoint
pub const METRICS_SERVER_PATH: &str = "/metrics";

/// Path for the liveness endpoint
pub const HEALTH_SERVER_PATH: &str = "/healthz";

/// Bind address for metrics HTTP server
pub const METRICS_SERVER_BIND_ADDRESS: &str = "0.0.0.0";
