// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Desired-state builders for the objects an `Aquarium` owns.
//!
//! Every builder here is a pure function of the `Aquarium`'s metadata and spec.
//! None of them read the aquarium's status or any live child state, so repeated
//! applies of the same spec produce byte-identical payloads.
//!
//! # Example
//!
//! ```rust,no_run
//! use aquarium_operator::crd::{Aquarium, AquariumSpec};
//! use aquarium_operator::reconcilers::resources::{build_deployment, to_apply_payload};
//!
//! let aquarium = Aquarium::new(
//!     "monterey",
//!     AquariumSpec {
//!         replica_count: 2,
//!         placement_namespace: "atlanta".to_string(),
//!         image: "busybox".to_string(),
//!     },
//! );
//! let payload = to_apply_payload(&build_deployment(&aquarium)).unwrap();
//! assert!(payload.get("status").is_none());
//! ```

use crate::constants::{
    API_GROUP_VERSION, CONTAINER_NAME_AQUARIUM, DEFAULT_PLACEMENT_NAMESPACE, KIND_AQUARIUM,
    PLACEHOLDER_COMMAND,
};
use crate::crd::Aquarium;
use crate::errors::Result;
use crate::labels::{identifying_labels, LOCATED_AT_LABEL};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, Namespace, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta, OwnerReference};
use kube::ResourceExt;
use tracing::debug;

/// Builds the controller owner reference pointing at `aquarium`.
///
/// `controller` and `blockOwnerDeletion` are both set so the garbage collector
/// deletes children together with their aquarium.
#[must_use]
pub fn build_owner_references(aquarium: &Aquarium) -> Vec<OwnerReference> {
    vec![OwnerReference {
        api_version: API_GROUP_VERSION.to_string(),
        kind: KIND_AQUARIUM.to_string(),
        name: aquarium.name_any(),
        uid: aquarium.metadata.uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }]
}

/// Namespace the aquarium's tanks are placed in.
///
/// An empty `placement_namespace` falls back to the default.
#[must_use]
pub fn placement_namespace(aquarium: &Aquarium) -> &str {
    if aquarium.spec.placement_namespace.is_empty() {
        DEFAULT_PLACEMENT_NAMESPACE
    } else {
        &aquarium.spec.placement_namespace
    }
}

/// Builds the child `Deployment` for an `Aquarium`.
///
/// - name: the aquarium's name
/// - namespace: the placement namespace
/// - labels: `app=Aquarium` plus `located-at=<placement namespace>`
/// - selector and pod template: `app=Aquarium` only
/// - one container named `aquarium` running `spec.image` with a placeholder command
#[must_use]
pub fn build_deployment(aquarium: &Aquarium) -> Deployment {
    let name = aquarium.name_any();
    let namespace = placement_namespace(aquarium);
    debug!(
        name = %name,
        namespace = %namespace,
        replicas = aquarium.spec.replica_count,
        "Building Deployment for Aquarium"
    );

    let mut labels = identifying_labels();
    labels.insert(LOCATED_AT_LABEL.to_string(), namespace.to_string());

    Deployment {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(namespace.to_string()),
            labels: Some(labels),
            owner_references: Some(build_owner_references(aquarium)),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(aquarium.spec.replica_count),
            selector: LabelSelector {
                match_labels: Some(identifying_labels()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(identifying_labels()),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: CONTAINER_NAME_AQUARIUM.to_string(),
                        image: Some(aquarium.spec.image.clone()),
                        command: Some(
                            PLACEHOLDER_COMMAND.iter().map(ToString::to_string).collect(),
                        ),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Builds the placement `Namespace`. Only ever created, never patched.
#[must_use]
pub fn build_namespace(aquarium: &Aquarium) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(placement_namespace(aquarium).to_string()),
            labels: Some(identifying_labels()),
            owner_references: Some(build_owner_references(aquarium)),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Serializes a `Deployment` for server-side apply.
///
/// Status goes through its own subresource; the `status` key is stripped here.
///
/// # Errors
///
/// Returns an error if the deployment cannot be serialized to JSON.
pub fn to_apply_payload(deployment: &Deployment) -> Result<serde_json::Value> {
    let mut payload = serde_json::to_value(deployment)?;
    if let Some(object) = payload.as_object_mut() {
        object.remove("status");
    }
    Ok(payload)
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod resources_tests;
