// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`ObjectStore`] for unit tests.
//!
//! Behaves like the API server where the reconciler can tell the difference:
//! stale status writes conflict, applies keep the live `status` of a
//! `Deployment`, and namespace creation reports prior existence. Every mutating
//! call is recorded.

use super::ObjectStore;
use crate::crd::{Aquarium, AquariumStatus};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentStatus};
use k8s_openapi::api::core::v1::Namespace;
use kube::ResourceExt;
use std::collections::BTreeMap;
use std::sync::Mutex;

type Key = (String, String);

fn key(namespace: &str, name: &str) -> Key {
    (namespace.to_string(), name.to_string())
}

/// A mutating call observed by the store.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    StatusPatch {
        namespace: String,
        name: String,
        status: AquariumStatus,
    },
    NamespaceCreate(String),
    DeploymentApply {
        namespace: String,
        name: String,
        payload: serde_json::Value,
    },
}

#[derive(Default)]
struct State {
    aquaria: BTreeMap<Key, Aquarium>,
    deployments: BTreeMap<Key, Deployment>,
    namespaces: BTreeMap<String, Namespace>,
    mutations: Vec<Mutation>,
    fail_reads: bool,
    fail_status_writes: bool,
    fail_applies: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an `Aquarium`, bumping its resourceVersion.
    pub fn put_aquarium(&self, mut aquarium: Aquarium) {
        let mut state = self.state.lock().unwrap();
        let k = key(&aquarium.namespace().unwrap(), &aquarium.name_any());
        let next = state
            .aquaria
            .get(&k)
            .and_then(|a| a.resource_version())
            .and_then(|rv| rv.parse::<u64>().ok())
            .unwrap_or(0)
            + 1;
        aquarium.metadata.resource_version = Some(next.to_string());
        state.aquaria.insert(k, aquarium);
    }

    pub fn remove_aquarium(&self, namespace: &str, name: &str) {
        self.state
            .lock()
            .unwrap()
            .aquaria
            .remove(&key(namespace, name));
    }

    pub fn aquarium(&self, namespace: &str, name: &str) -> Option<Aquarium> {
        self.state
            .lock()
            .unwrap()
            .aquaria
            .get(&key(namespace, name))
            .cloned()
    }

    pub fn deployment(&self, namespace: &str, name: &str) -> Option<Deployment> {
        self.state
            .lock()
            .unwrap()
            .deployments
            .get(&key(namespace, name))
            .cloned()
    }

    pub fn put_namespace(&self, name: &str) {
        let mut ns = Namespace::default();
        ns.metadata.name = Some(name.to_string());
        self.state
            .lock()
            .unwrap()
            .namespaces
            .insert(name.to_string(), ns);
    }

    pub fn namespace(&self, name: &str) -> Option<Namespace> {
        self.state.lock().unwrap().namespaces.get(name).cloned()
    }

    /// Simulate the workload controller reporting ready replicas.
    pub fn set_ready_replicas(&self, namespace: &str, name: &str, ready: i32) {
        let mut state = self.state.lock().unwrap();
        if let Some(deployment) = state.deployments.get_mut(&key(namespace, name)) {
            deployment.status = Some(DeploymentStatus {
                ready_replicas: Some(ready),
                ..Default::default()
            });
        }
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.state.lock().unwrap().mutations.clone()
    }

    pub fn clear_mutations(&self) {
        self.state.lock().unwrap().mutations.clear();
    }

    pub fn applied_payloads(&self) -> Vec<serde_json::Value> {
        self.mutations()
            .into_iter()
            .filter_map(|m| match m {
                Mutation::DeploymentApply { payload, .. } => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }

    pub fn fail_status_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_status_writes = fail;
    }

    pub fn fail_applies(&self, fail: bool) {
        self.state.lock().unwrap().fail_applies = fail;
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_aquarium(&self, namespace: &str, name: &str) -> Result<Option<Aquarium>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(Error::Unavailable("read failed".into()));
        }
        Ok(state.aquaria.get(&key(namespace, name)).cloned())
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Option<Deployment>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(Error::Unavailable("read failed".into()));
        }
        Ok(state.deployments.get(&key(namespace, name)).cloned())
    }

    async fn patch_aquarium_status(
        &self,
        aquarium: &Aquarium,
        status: &AquariumStatus,
    ) -> Result<()> {
        let namespace = aquarium.namespace().unwrap_or_default();
        let name = aquarium.name_any();

        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.mutations.push(Mutation::StatusPatch {
            namespace: namespace.clone(),
            name: name.clone(),
            status: status.clone(),
        });
        if state.fail_status_writes {
            return Err(Error::Unavailable("status write failed".into()));
        }

        let stored = state
            .aquaria
            .get_mut(&key(&namespace, &name))
            .ok_or_else(|| Error::Unavailable("aquarium not found".into()))?;
        if stored.resource_version() != aquarium.resource_version() {
            return Err(Error::Unavailable("resourceVersion conflict".into()));
        }
        stored.status = Some(status.clone());
        let next = stored
            .resource_version()
            .and_then(|rv| rv.parse::<u64>().ok())
            .unwrap_or(0)
            + 1;
        stored.metadata.resource_version = Some(next.to_string());
        Ok(())
    }

    async fn create_namespace(&self, namespace: &Namespace) -> Result<bool> {
        let name = namespace.name_any();
        let mut state = self.state.lock().unwrap();
        state.mutations.push(Mutation::NamespaceCreate(name.clone()));
        if state.namespaces.contains_key(&name) {
            return Ok(false);
        }
        state.namespaces.insert(name, namespace.clone());
        Ok(true)
    }

    async fn apply_deployment(
        &self,
        namespace: &str,
        name: &str,
        payload: &serde_json::Value,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.mutations.push(Mutation::DeploymentApply {
            namespace: namespace.to_string(),
            name: name.to_string(),
            payload: payload.clone(),
        });
        if state.fail_applies {
            return Err(Error::Unavailable("apply failed".into()));
        }
        if payload.get("status").is_some() {
            return Err(Error::Unavailable("status is not allowed in apply".into()));
        }

        let mut applied: Deployment = serde_json::from_value(payload.clone())?;
        let k = key(namespace, name);
        applied.status = state.deployments.get(&k).and_then(|d| d.status.clone());
        state.deployments.insert(k, applied);
        Ok(())
    }
}
