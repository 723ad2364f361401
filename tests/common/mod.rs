// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common test utilities for integration tests

use aquarium_operator::crd::{Aquarium, AquariumSpec};
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, DeleteParams, PostParams};
use kube::client::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;

/// Get a Kubernetes client or skip the test if not in a cluster
pub async fn get_kube_client_or_skip() -> Option<Client> {
    match Client::try_default().await {
        Ok(client) => {
            println!("✓ Successfully connected to Kubernetes cluster");
            Some(client)
        }
        Err(e) => {
            eprintln!("⊘ Skipping integration test: not running in Kubernetes cluster: {e}");
            None
        }
    }
}

/// Create a test namespace
pub async fn create_test_namespace(
    client: &Client,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let labels = BTreeMap::from([
        ("test".to_string(), "integration".to_string()),
        ("managed-by".to_string(), "aquarium-operator-test".to_string()),
    ]);
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(labels),
            ..Default::default()
        },
        ..Default::default()
    };

    match namespaces.create(&PostParams::default(), &ns).await {
        Ok(_) => {
            println!("✓ Created test namespace: {name}");
            Ok(())
        }
        Err(kube::Error::Api(ae)) if ae.code == 409 => {
            println!("  Test namespace already exists: {name}");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Delete a namespace, ignoring errors
pub async fn cleanup_namespace(client: &Client, name: &str) {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    match namespaces.delete(name, &DeleteParams::default()).await {
        Ok(_) => println!("✓ Deleted namespace: {name}"),
        Err(e) => eprintln!("  Failed to delete namespace {name}: {e}"),
    }
}

/// Build a test `Aquarium` in `namespace`
pub fn test_aquarium(name: &str, namespace: &str, placement: &str, replicas: i32) -> Aquarium {
    let mut aquarium = Aquarium::new(
        name,
        AquariumSpec {
            replica_count: replicas,
            placement_namespace: placement.to_string(),
            image: "busybox:1.36".to_string(),
        },
    );
    aquarium.metadata.namespace = Some(namespace.to_string());
    aquarium
}

/// Poll `check` once per second until it returns true or `timeout_secs` elapse
pub async fn wait_for<F, Fut>(timeout_secs: u64, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..timeout_secs {
        if check().await {
            return true;
        }
        sleep(Duration::from_secs(1)).await;
    }
    false
}
