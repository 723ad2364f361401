// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! [`ObjectStore`] backed by the Kubernetes API.

use super::ObjectStore;
use crate::crd::{Aquarium, AquariumStatus};
use crate::errors::{is_api_status, Error, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Patch, PatchParams, PostParams};
use kube::{Api, Client, ResourceExt};
use serde_json::json;
use tracing::debug;

/// HTTP status returned by the API server when an object already exists
const HTTP_CONFLICT: u16 = 409;

/// Production object store over a `kube::Client`.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
    field_manager: String,
}

impl KubeStore {
    #[must_use]
    pub fn new(client: Client, field_manager: impl Into<String>) -> Self {
        Self {
            client,
            field_manager: field_manager.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for KubeStore {
    async fn get_aquarium(&self, namespace: &str, name: &str) -> Result<Option<Aquarium>> {
        let api: Api<Aquarium> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Option<Deployment>> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn patch_aquarium_status(
        &self,
        aquarium: &Aquarium,
        status: &AquariumStatus,
    ) -> Result<()> {
        let namespace = aquarium
            .namespace()
            .ok_or_else(|| Error::missing("Aquarium", "namespace"))?;
        let name = aquarium.name_any();
        let api: Api<Aquarium> = Api::namespaced(self.client.clone(), &namespace);

        // A stale resourceVersion makes the API server reject the write with 409.
        let patch = json!({
            "metadata": { "resourceVersion": aquarium.resource_version() },
            "status": status,
        });

        api.patch_status(&name, &PatchParams::default(), &Patch::Merge(patch))
            .await?;
        Ok(())
    }

    async fn create_namespace(&self, namespace: &Namespace) -> Result<bool> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        match api.create(&PostParams::default(), namespace).await {
            Ok(_) => Ok(true),
            Err(e) if is_api_status(&e, HTTP_CONFLICT) => {
                debug!(namespace = %namespace.name_any(), "Namespace already exists");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn apply_deployment(
        &self,
        namespace: &str,
        name: &str,
        payload: &serde_json::Value,
    ) -> Result<()> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        api.patch(
            name,
            &PatchParams::apply(&self.field_manager).force(),
            &Patch::Apply(payload),
        )
        .await?;
        Ok(())
    }
}
