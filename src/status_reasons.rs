// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status condition types, reasons and messages for `Aquarium` resources.
//!
//! Reasons are programmatic identifiers in CamelCase that explain why a condition has
//! a particular status.
//!
//! # Example Status
//!
//! ```yaml
//! status:
//!   ready_replica_count: 2
//!   health: Healthy
//!   conditions:
//!     - type: aquariumReady
//!       status: "True"
//!       observedGeneration: 3
//!       reason: AquariumIsHealthy
//!       message: "All requested tanks are ready"
//!       lastTransitionTime: "2025-01-01T00:00:00+00:00"
//! ```

// ============================================================================
// Condition Types
// ============================================================================

/// Readiness condition maintained on every `Aquarium`
pub const CONDITION_TYPE_AQUARIUM_READY: &str = "aquariumReady";

// ============================================================================
// Condition Status Values
// ============================================================================

/// Condition holds
pub const CONDITION_STATUS_TRUE: &str = "True";

/// Condition does not hold
pub const CONDITION_STATUS_FALSE: &str = "False";

/// Condition could not be evaluated
pub const CONDITION_STATUS_UNKNOWN: &str = "Unknown";

// ============================================================================
// Reasons
// ============================================================================

/// The child workload reports exactly the requested number of ready replicas.
pub const REASON_AQUARIUM_IS_HEALTHY: &str = "AquariumIsHealthy";

/// The child workload is missing, or its ready count differs from the request.
pub const REASON_AQUARIUM_IS_UNHEALTHY: &str = "AquariumIsUnHealthy";

// ============================================================================
// Messages
// ============================================================================

/// Message paired with [`REASON_AQUARIUM_IS_HEALTHY`]
pub const MESSAGE_AQUARIUM_HEALTHY: &str = "All requested tanks are ready";

/// Message paired with [`REASON_AQUARIUM_IS_UNHEALTHY`]
pub const MESSAGE_AQUARIUM_UNHEALTHY: &str = "Requested tanks are not all ready";
