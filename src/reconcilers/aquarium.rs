// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `Aquarium` reconciliation logic.
//!
//! One pass reads the aquarium and its child `Deployment`, writes the observed
//! health onto the aquarium's status, makes sure the placement namespace exists,
//! and server-side applies the desired `Deployment`.
//!
//! Status is written before the apply, so it always describes the child as it
//! was observed at the start of the pass rather than what was just requested.
//! Every step is idempotent; on error the whole pass is retried from scratch.

use crate::crd::Health;
use crate::metrics;
use crate::reconcilers::resources::{
    build_deployment, build_namespace, placement_namespace, to_apply_payload,
};
use crate::reconcilers::status::{classify_health, AquariumStatusUpdater};
use crate::store::ObjectStore;
use anyhow::{Context as _, Result};
use tracing::{debug, info, warn};

/// What happened to the status write during a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusWrite {
    /// The status was unchanged, or there was no aquarium to write to.
    NotAttempted,
    Written,
    /// The write failed; the pass continued regardless.
    Failed,
}

/// Result of a single reconciliation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// False when the aquarium no longer exists and nothing was done.
    pub found: bool,
    pub health: Option<Health>,
    pub status_write: StatusWrite,
}

impl ReconcileOutcome {
    fn not_found() -> Self {
        Self {
            found: false,
            health: None,
            status_write: StatusWrite::NotAttempted,
        }
    }
}

/// Reconciles the `Aquarium` identified by `namespace`/`name`.
///
/// # Errors
///
/// Returns an error if the aquarium or its `Deployment` cannot be read, or if the
/// placement namespace cannot be created or the `Deployment` cannot be applied.
/// A failed status write is logged and does not fail the pass.
pub async fn reconcile_aquarium(
    store: &dyn ObjectStore,
    namespace: &str,
    name: &str,
) -> Result<ReconcileOutcome> {
    debug!(namespace = %namespace, name = %name, "Starting Aquarium reconciliation");

    let Some(aquarium) = store
        .get_aquarium(namespace, name)
        .await
        .with_context(|| format!("failed to get Aquarium {namespace}/{name}"))?
    else {
        // Children are removed by owner-reference garbage collection.
        debug!("Aquarium {}/{} not found, nothing to do", namespace, name);
        return Ok(ReconcileOutcome::not_found());
    };

    let placement = placement_namespace(&aquarium).to_string();
    let requested = aquarium.spec.replica_count;

    let deployment = store
        .get_deployment(&placement, name)
        .await
        .with_context(|| format!("failed to get Deployment {placement}/{name}"))?;
    if deployment.is_none() {
        debug!("Deployment {}/{} does not exist yet", placement, name);
    }

    let ready = deployment
        .as_ref()
        .and_then(|d| d.status.as_ref())
        .and_then(|s| s.ready_replicas);
    let health = classify_health(requested, ready);
    debug!(
        requested,
        ready = ?ready,
        health = %health,
        "Classified Aquarium health"
    );
    metrics::set_aquarium_health(namespace, name, health);

    let mut updater = AquariumStatusUpdater::new(&aquarium);
    updater.observe(ready.unwrap_or(0), health);
    let status_write = match updater.apply(store, &aquarium).await {
        Ok(true) => StatusWrite::Written,
        Ok(false) => StatusWrite::NotAttempted,
        Err(e) => {
            warn!(
                "Failed to update status for Aquarium {}/{}: {}",
                namespace, name, e
            );
            metrics::record_status_write_failure();
            StatusWrite::Failed
        }
    };

    let created = store
        .create_namespace(&build_namespace(&aquarium))
        .await
        .with_context(|| format!("failed to create Namespace {placement}"))?;
    if created {
        info!(
            "Created placement Namespace {} for Aquarium {}/{}",
            placement, namespace, name
        );
    }

    let payload = to_apply_payload(&build_deployment(&aquarium))?;
    store
        .apply_deployment(&placement, name, &payload)
        .await
        .with_context(|| format!("failed to apply Deployment {placement}/{name}"))?;

    info!(
        "Reconciled Aquarium {}/{}: {} of {} tanks ready ({})",
        namespace,
        name,
        ready.unwrap_or(0),
        requested,
        health
    );

    Ok(ReconcileOutcome {
        found: true,
        health: Some(health),
        status_write,
    })
}

#[cfg(test)]
#[path = "aquarium_tests.rs"]
mod aquarium_tests;
