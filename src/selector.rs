// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Event routing from owned child objects back to their `Aquarium`.
//!
//! # Architecture
//!
//! Children live in the aquarium's placement namespace (and `Namespace` objects
//! are cluster-scoped), so the owner reference alone cannot say which namespace
//! the owning `Aquarium` lives in. The controller keeps an in-memory cache of all
//! `Aquarium` resources via a reflector; the watch mapper resolves the owner
//! reference UID against that cache.
//!
//! Only children carrying `app=Aquarium` are routed at all. Anything else
//! changing in the cluster never reaches the reconciler.
//!
//! # Example
//!
//! ```rust,no_run
//! use aquarium_operator::crd::Aquarium;
//! use aquarium_operator::selector::find_owning_aquaria;
//! use k8s_openapi::api::apps::v1::Deployment;
//! use kube::runtime::reflector::Store;
//!
//! # fn example(store: Store<Aquarium>, deployment: Deployment) {
//! for aquarium in find_owning_aquaria(&store, &deployment) {
//!     println!("Deployment is owned by {}", aquarium.name);
//! }
//! # }
//! ```

use crate::constants::{API_GROUP_VERSION, KIND_AQUARIUM};
use crate::crd::Aquarium;
use crate::labels::{APP_AQUARIUM, APP_LABEL};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::runtime::reflector::{ObjectRef, Store};
use kube::Resource;
use tracing::debug;

/// Returns true if the object carries the identifying `app=Aquarium` label.
#[must_use]
pub fn has_aquarium_label(meta: &ObjectMeta) -> bool {
    meta.labels
        .as_ref()
        .and_then(|labels| labels.get(APP_LABEL))
        .is_some_and(|value| value == APP_AQUARIUM)
}

/// Find the `Aquarium` resources that own `child`.
///
/// Returns nothing for children without the identifying label, children without
/// an `Aquarium` controller owner reference, and owners that are not (or no
/// longer) in the cache.
pub fn find_owning_aquaria<K>(store: &Store<Aquarium>, child: &K) -> Vec<ObjectRef<Aquarium>>
where
    K: Resource,
{
    let meta = child.meta();
    if !has_aquarium_label(meta) {
        return Vec::new();
    }

    let Some(owner) = meta.owner_references.as_ref().and_then(|refs| {
        refs.iter().find(|r| {
            r.controller == Some(true)
                && r.kind == KIND_AQUARIUM
                && r.api_version == API_GROUP_VERSION
        })
    }) else {
        return Vec::new();
    };

    let owners: Vec<ObjectRef<Aquarium>> = store
        .state()
        .iter()
        .filter(|aquarium| aquarium.metadata.uid.as_deref() == Some(owner.uid.as_str()))
        .map(|aquarium| ObjectRef::from_obj(&**aquarium))
        .collect();

    if owners.is_empty() {
        debug!(
            owner = %owner.name,
            uid = %owner.uid,
            "Owning Aquarium not in cache, dropping event"
        );
    }
    owners
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
