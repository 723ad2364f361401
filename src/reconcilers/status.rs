// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Health classification and status condition helpers for `Aquarium` resources.
//!
//! # Condition Format
//!
//! Conditions follow the standard Kubernetes format:
//! - `type`: The aspect of the resource being reported (`aquariumReady`)
//! - `status`: "True", "False", or "Unknown"
//! - `observedGeneration`: the `Aquarium` generation the condition was computed for
//! - `reason`: A programmatic identifier (CamelCase)
//! - `message`: A human-readable explanation
//! - `lastTransitionTime`: RFC3339 timestamp of the last `status` change
//!
//! # Example
//!
//! ```rust,no_run
//! use aquarium_operator::crd::Health;
//! use aquarium_operator::reconcilers::status::classify_health;
//!
//! assert_eq!(classify_health(2, Some(2)), Health::Healthy);
//! assert_eq!(classify_health(2, None), Health::Unhealthy);
//! ```

use crate::crd::{Aquarium, AquariumStatus, Condition, Health};
use crate::errors::Result;
use crate::status_reasons::{
    CONDITION_TYPE_AQUARIUM_READY, MESSAGE_AQUARIUM_HEALTHY, MESSAGE_AQUARIUM_UNHEALTHY,
    REASON_AQUARIUM_IS_HEALTHY, REASON_AQUARIUM_IS_UNHEALTHY,
};
use crate::store::ObjectStore;
use chrono::Utc;
use kube::ResourceExt;
use tracing::debug;

/// Classify an aquarium's health from the requested and ready replica counts.
///
/// Exact equality is `Healthy`; anything else, including more ready replicas than
/// requested, is `Unhealthy`. A missing ready count counts as zero.
#[must_use]
pub fn classify_health(desired: i32, ready: Option<i32>) -> Health {
    if ready.unwrap_or(0) == desired {
        Health::Healthy
    } else {
        Health::Unhealthy
    }
}

/// Create a new condition stamped with the current time.
///
/// # Example
///
/// ```rust,no_run
/// # use aquarium_operator::reconcilers::status::create_condition;
/// let condition = create_condition(
///     "aquariumReady",
///     "True",
///     "AquariumIsHealthy",
///     "All requested tanks are ready",
///     Some(3),
/// );
/// assert_eq!(condition.r#type, "aquariumReady");
/// assert_eq!(condition.observed_generation, Some(3));
/// ```
#[must_use]
pub fn create_condition(
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
    observed_generation: Option<i64>,
) -> Condition {
    Condition {
        r#type: condition_type.to_string(),
        status: status.to_string(),
        observed_generation,
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        last_transition_time: Some(Utc::now().to_rfc3339()),
    }
}

/// Find a condition by type.
#[must_use]
pub fn find_condition<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

/// Update or add a condition in a conditions list (in-memory, no API call).
///
/// The list holds at most one condition per type. If a condition of this type
/// already exists its reason, message and `observedGeneration` are refreshed, and
/// `lastTransitionTime` only moves when `status` actually changes.
pub fn upsert_condition(
    conditions: &mut Vec<Condition>,
    condition_type: &str,
    status: &str,
    reason: &str,
    message: &str,
    observed_generation: Option<i64>,
) {
    if let Some(existing) = conditions.iter_mut().find(|c| c.r#type == condition_type) {
        let last_transition_time = if existing.status == status {
            existing
                .last_transition_time
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339())
        } else {
            Utc::now().to_rfc3339()
        };

        existing.status = status.to_string();
        existing.observed_generation = observed_generation;
        existing.reason = Some(reason.to_string());
        existing.message = Some(message.to_string());
        existing.last_transition_time = Some(last_transition_time);
    } else {
        conditions.push(create_condition(
            condition_type,
            status,
            reason,
            message,
            observed_generation,
        ));
    }
}

/// Compare two condition lists, ignoring `lastTransitionTime`.
#[must_use]
pub fn conditions_equal(current: &[Condition], new: &[Condition]) -> bool {
    if current.len() != new.len() {
        return false;
    }

    new.iter().all(|new_cond| {
        find_condition(current, &new_cond.r#type).is_some_and(|curr_cond| {
            curr_cond.status == new_cond.status
                && curr_cond.observed_generation == new_cond.observed_generation
                && curr_cond.reason == new_cond.reason
                && curr_cond.message == new_cond.message
        })
    })
}

/// Collects the status computed for one `Aquarium` pass and writes it in a single call.
///
/// A status identical to the current one is never written, so a steady-state pass
/// does not generate a watch event on the aquarium.
pub struct AquariumStatusUpdater {
    namespace: String,
    name: String,
    generation: Option<i64>,
    current_status: Option<AquariumStatus>,
    new_status: AquariumStatus,
}

impl AquariumStatusUpdater {
    /// Start from the aquarium's current status, or an empty one.
    #[must_use]
    pub fn new(aquarium: &Aquarium) -> Self {
        let current_status = aquarium.status.clone();
        let new_status = current_status.clone().unwrap_or_default();

        Self {
            namespace: aquarium.namespace().unwrap_or_default(),
            name: aquarium.name_any(),
            generation: aquarium.metadata.generation,
            current_status,
            new_status,
        }
    }

    /// Record the observed ready count and the health derived from it.
    ///
    /// Also upserts the `aquariumReady` condition, mirroring `health`.
    pub fn observe(&mut self, ready_replicas: i32, health: Health) {
        self.new_status.ready_replica_count = ready_replicas;
        self.new_status.health = health;

        let (reason, message) = if health == Health::Healthy {
            (REASON_AQUARIUM_IS_HEALTHY, MESSAGE_AQUARIUM_HEALTHY)
        } else {
            (REASON_AQUARIUM_IS_UNHEALTHY, MESSAGE_AQUARIUM_UNHEALTHY)
        };
        upsert_condition(
            &mut self.new_status.conditions,
            CONDITION_TYPE_AQUARIUM_READY,
            health.condition_status(),
            reason,
            message,
            self.generation,
        );
    }

    /// Whether the collected status differs from the one last persisted.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        match &self.current_status {
            None => true,
            Some(current) => {
                current.ready_replica_count != self.new_status.ready_replica_count
                    || current.health != self.new_status.health
                    || !conditions_equal(&current.conditions, &self.new_status.conditions)
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> &AquariumStatus {
        &self.new_status
    }

    /// Persist the collected status if it changed.
    ///
    /// Returns `Ok(false)` when nothing needed writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the status write fails, including a stale `resourceVersion`.
    pub async fn apply(&self, store: &dyn ObjectStore, aquarium: &Aquarium) -> Result<bool> {
        if !self.has_changes() {
            debug!(
                "Aquarium {}/{} status unchanged, skipping update",
                self.namespace, self.name
            );
            return Ok(false);
        }

        store
            .patch_aquarium_status(aquarium, &self.new_status)
            .await?;

        debug!(
            "Updated Aquarium {}/{} status: health={} ready={}",
            self.namespace, self.name, self.new_status.health, self.new_status.ready_replica_count
        );
        Ok(true)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
