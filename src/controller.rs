// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Controller registration for `Aquarium` resources.
//!
//! - `Aquarium` objects are watched through a reflector, and only generation
//!   changes trigger a pass (status-only updates are filtered out).
//! - `Deployment` and `Namespace` objects are watched with a server-side
//!   `app=Aquarium` label selector and routed back to their owning aquarium.
//! - Successful passes are requeued after the resync interval; failed passes
//!   back off exponentially per aquarium.

use crate::config::OperatorConfig;
use crate::context::Context;
use crate::crd::Aquarium;
use crate::labels::owned_selector;
use crate::metrics;
use crate::reconcilers::reconcile_aquarium;
use crate::reconcilers::retry::ErrorBackoffs;
use crate::selector::find_owning_aquaria;
use crate::store::KubeStore;
use futures::{StreamExt, TryStreamExt};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use kube::runtime::controller::{self, Action};
use kube::runtime::{predicates, reflector, watcher, Controller, PredicateConfig, WatchStreamExt};
use kube::{Api, Client, ResourceExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ReconcileError(#[from] anyhow::Error);

/// Key used for per-aquarium backoff bookkeeping.
fn backoff_key(aquarium: &Aquarium) -> String {
    format!(
        "{}/{}",
        aquarium.namespace().unwrap_or_default(),
        aquarium.name_any()
    )
}

/// Drop per-aquarium metrics and backoff state once a delete is observed.
///
/// Deleted objects leave the reflector store, so the controller usually never
/// runs another pass for them.
pub fn forget_deleted(event: &watcher::Event<Aquarium>, backoffs: &ErrorBackoffs) {
    if let watcher::Event::Delete(aquarium) = event {
        let namespace = aquarium.namespace().unwrap_or_default();
        let name = aquarium.name_any();
        debug!("Forgetting deleted Aquarium {}/{}", namespace, name);
        metrics::forget_aquarium(&namespace, &name);
        backoffs.reset(&backoff_key(aquarium));
    }
}

/// Run the `Aquarium` controller until a shutdown signal is received.
///
/// # Errors
///
/// Returns an error only if the controller cannot be set up.
pub async fn run(client: Client, config: OperatorConfig) -> anyhow::Result<()> {
    info!(
        namespace = ?config.namespace,
        concurrency = config.concurrency,
        "Starting Aquarium controller"
    );

    let aquaria: Api<Aquarium> = match &config.namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };
    let deployments: Api<Deployment> = Api::all(client.clone());
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let store = Arc::new(KubeStore::new(client, config.field_manager.clone()));
    let concurrency = config.concurrency;
    let ctx = Arc::new(Context::new(store, config));
    let backoffs = ctx.backoffs.clone();

    let (reader, writer) = reflector::store();
    let aquarium_stream = watcher(aquaria, watcher::Config::default())
        .default_backoff()
        .reflect(writer)
        .inspect_ok(move |event| forget_deleted(event, &backoffs))
        .applied_objects()
        .predicate_filter(predicates::generation, PredicateConfig::default());

    let owned = watcher::Config::default().labels(&owned_selector());
    let deployment_stream = watcher(deployments, owned.clone())
        .default_backoff()
        .touched_objects();
    let namespace_stream = watcher(namespaces, owned).default_backoff().touched_objects();

    let deployment_owners = reader.clone();
    let namespace_owners = reader.clone();

    Controller::for_stream(aquarium_stream, reader)
        .with_config(controller::Config::default().concurrency(concurrency))
        .watches_stream(deployment_stream, move |deployment: Deployment| {
            find_owning_aquaria(&deployment_owners, &deployment)
        })
        .watches_stream(namespace_stream, move |namespace: Namespace| {
            find_owning_aquaria(&namespace_owners, &namespace)
        })
        .shutdown_on_signal()
        .run(reconcile, error_policy, ctx)
        .for_each(|res| async move {
            match res {
                Ok((obj, _)) => debug!("Reconciled {}", obj),
                Err(e) => warn!("Reconciliation failed: {}", e),
            }
        })
        .await;

    info!("Aquarium controller stopped");
    Ok(())
}

/// Reconcile wrapper for `Aquarium`
pub async fn reconcile(
    aquarium: Arc<Aquarium>,
    ctx: Arc<Context>,
) -> Result<Action, ReconcileError> {
    let namespace = aquarium.namespace().unwrap_or_default();
    let name = aquarium.name_any();
    debug!(
        aquarium = %name,
        namespace = %namespace,
        generation = ?aquarium.metadata.generation,
        "Reconcile wrapper called for Aquarium"
    );

    let start = Instant::now();
    match reconcile_aquarium(ctx.store.as_ref(), &namespace, &name).await {
        Ok(outcome) => {
            metrics::record_reconciliation_success(start.elapsed());
            ctx.backoffs.reset(&backoff_key(&aquarium));

            if !outcome.found {
                metrics::forget_aquarium(&namespace, &name);
                return Ok(Action::await_change());
            }
            metrics::record_requeue("resync");
            Ok(Action::requeue(ctx.config.resync_interval()))
        }
        Err(e) => {
            metrics::record_reconciliation_error(start.elapsed());
            error!("Failed to reconcile Aquarium {}/{}: {:#}", namespace, name, e);
            Err(e.into())
        }
    }
}

/// Error policy for the `Aquarium` controller
pub fn error_policy(aquarium: Arc<Aquarium>, err: &ReconcileError, ctx: Arc<Context>) -> Action {
    let key = backoff_key(&aquarium);
    let delay = ctx.backoffs.next_delay(&key);
    warn!(
        aquarium = %key,
        delay_secs = delay.as_secs(),
        "Requeueing after error: {}",
        err
    );
    metrics::record_requeue("error");
    Action::requeue(delay)
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
