// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definition for the `Aquarium` resource.
//!
//! An `Aquarium` is a named group of replicated tanks (pods) with a requested count,
//! a placement namespace and a container image. The controller drives a `Deployment`
//! towards that request and reports observed health back onto the status.
//!
//! # Example: Creating an Aquarium
//!
//! ```rust,no_run
//! use aquarium_operator::crd::{Aquarium, AquariumSpec};
//!
//! let aquarium = Aquarium::new(
//!     "monterey",
//!     AquariumSpec {
//!         replica_count: 2,
//!         placement_namespace: "atlanta".to_string(),
//!         image: "busybox:1.36".to_string(),
//!     },
//! );
//! ```

use crate::constants::DEFAULT_PLACEMENT_NAMESPACE;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition represents an observation of a resource's current state.
///
/// Conditions are keyed by `type`: an `Aquarium` carries at most one condition of
/// each type.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition, e.g. `aquariumReady`.
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Generation of the `Aquarium` the condition was computed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// Observed health of an `Aquarium`.
///
/// `Unknown` is the initial state before the first comparison; afterwards every
/// pass lands on `Healthy` or `Unhealthy`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub enum Health {
    /// Ready replicas match the requested count exactly.
    Healthy,
    /// Ready replicas differ from the requested count.
    Unhealthy,
    /// No comparison has been made yet.
    #[default]
    Unknown,
}

impl Health {
    /// Condition status string mirroring this health value.
    #[must_use]
    pub fn condition_status(self) -> &'static str {
        match self {
            Health::Healthy => crate::status_reasons::CONDITION_STATUS_TRUE,
            Health::Unhealthy => crate::status_reasons::CONDITION_STATUS_FALSE,
            Health::Unknown => crate::status_reasons::CONDITION_STATUS_UNKNOWN,
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Health::Healthy => "Healthy",
            Health::Unhealthy => "Unhealthy",
            Health::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

fn default_placement_namespace() -> String {
    DEFAULT_PLACEMENT_NAMESPACE.to_string()
}

/// `Aquarium` declares a replicated group of tanks running a container image.
///
/// # Example
///
/// ```yaml
/// apiVersion: fun.tydanny.com/v1alpha1
/// kind: Aquarium
/// metadata:
///   name: monterey
///   namespace: aquarium
/// spec:
///   replica_count: 2
///   placement_namespace: atlanta
///   image: busybox:1.36
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[kube(
    group = "fun.tydanny.com",
    version = "v1alpha1",
    kind = "Aquarium",
    plural = "aquaria",
    namespaced,
    derive = "PartialEq",
    doc = "Aquarium declares a replicated group of tanks. The controller keeps a Deployment in the placement namespace at the requested replica count and reports its health.",
    printcolumn = r#"{"name":"Tanks","type":"integer","jsonPath":".spec.replica_count"}"#,
    printcolumn = r#"{"name":"Ready","type":"integer","jsonPath":".status.ready_replica_count"}"#,
    printcolumn = r#"{"name":"Fish Health","type":"string","jsonPath":".status.health"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[kube(status = "AquariumStatus")]
pub struct AquariumSpec {
    /// Number of tanks (pod replicas) requested.
    #[schemars(range(min = 1))]
    pub replica_count: i32,

    /// Namespace the tanks are placed in. Created by the controller if missing.
    #[serde(default = "default_placement_namespace")]
    pub placement_namespace: String,

    /// Container image every tank runs.
    #[serde(default)]
    pub image: String,
}

/// `Aquarium` status, written only by the controller.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct AquariumStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Ready replicas reported by the child `Deployment` on the last pass.
    #[serde(default)]
    pub ready_replica_count: i32,

    #[serde(default)]
    pub health: Health,
}

#[cfg(test)]
#[path = "crd_tests.rs"]
mod crd_tests;
