// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `resources.rs`

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::crd::{Aquarium, AquariumSpec, AquariumStatus, Health};
    use k8s_openapi::api::apps::v1::DeploymentStatus;

    const TEST_NAMESPACE: &str = "aquarium";
    const TEST_NAME: &str = "monterey";
    const TEST_UID: &str = "3f1c0a6e-8a5e-4c0e-9d55-0a1b2c3d4e5f";

    fn create_test_aquarium(replicas: i32, placement: &str) -> Aquarium {
        let mut aquarium = Aquarium::new(
            TEST_NAME,
            AquariumSpec {
                replica_count: replicas,
                placement_namespace: placement.to_string(),
                image: "busybox:1.36".to_string(),
            },
        );
        aquarium.metadata.namespace = Some(TEST_NAMESPACE.to_string());
        aquarium.metadata.uid = Some(TEST_UID.to_string());
        aquarium.metadata.generation = Some(1);
        aquarium
    }

    #[test]
    fn test_owner_reference_is_controller() {
        let aquarium = create_test_aquarium(2, "atlanta");
        let refs = build_owner_references(&aquarium);

        assert_eq!(refs.len(), 1);
        let owner = &refs[0];
        assert_eq!(owner.api_version, "fun.tydanny.com/v1alpha1");
        assert_eq!(owner.kind, "Aquarium");
        assert_eq!(owner.name, TEST_NAME);
        assert_eq!(owner.uid, TEST_UID);
        assert_eq!(owner.controller, Some(true));
        assert_eq!(owner.block_owner_deletion, Some(true));
    }

    #[test]
    fn test_build_deployment_metadata() {
        let aquarium = create_test_aquarium(2, "atlanta");
        let deployment = build_deployment(&aquarium);

        assert_eq!(deployment.metadata.name.as_deref(), Some(TEST_NAME));
        assert_eq!(deployment.metadata.namespace.as_deref(), Some("atlanta"));

        let labels = deployment.metadata.labels.as_ref().unwrap();
        assert_eq!(labels.get("app").map(String::as_str), Some("Aquarium"));
        assert_eq!(labels.get("located-at").map(String::as_str), Some("atlanta"));
        assert_eq!(deployment.metadata.owner_references.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_build_deployment_spec() {
        let aquarium = create_test_aquarium(2, "atlanta");
        let spec = build_deployment(&aquarium).spec.unwrap();

        assert_eq!(spec.replicas, Some(2));
        let selector = spec.selector.match_labels.unwrap();
        assert_eq!(selector.len(), 1);
        assert_eq!(selector.get("app").map(String::as_str), Some("Aquarium"));

        let template_labels = spec.template.metadata.unwrap().labels.unwrap();
        assert_eq!(template_labels, selector);

        let containers = spec.template.spec.unwrap().containers;
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "aquarium");
        assert_eq!(containers[0].image.as_deref(), Some("busybox:1.36"));
        assert_eq!(
            containers[0].command,
            Some(vec!["sleep".to_string(), "10000".to_string()])
        );
    }

    #[test]
    fn test_build_deployment_is_deterministic() {
        let aquarium = create_test_aquarium(3, "atlanta");
        let first = to_apply_payload(&build_deployment(&aquarium)).unwrap();
        let second = to_apply_payload(&build_deployment(&aquarium)).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_build_deployment_ignores_aquarium_status() {
        let aquarium = create_test_aquarium(2, "atlanta");
        let mut tampered = aquarium.clone();
        tampered.status = Some(AquariumStatus {
            conditions: vec![],
            ready_replica_count: 7,
            health: Health::Healthy,
        });

        assert_eq!(build_deployment(&aquarium), build_deployment(&tampered));
    }

    #[test]
    fn test_empty_placement_namespace_falls_back_to_default() {
        let aquarium = create_test_aquarium(1, "");
        assert_eq!(placement_namespace(&aquarium), "pier39");
        assert_eq!(
            build_deployment(&aquarium).metadata.namespace.as_deref(),
            Some("pier39")
        );
    }

    #[test]
    fn test_build_namespace() {
        let aquarium = create_test_aquarium(2, "atlanta");
        let namespace = build_namespace(&aquarium);

        assert_eq!(namespace.metadata.name.as_deref(), Some("atlanta"));
        assert_eq!(
            namespace
                .metadata
                .labels
                .as_ref()
                .and_then(|l| l.get("app"))
                .map(String::as_str),
            Some("Aquarium")
        );
        assert_eq!(
            namespace.metadata.owner_references.unwrap()[0].uid,
            TEST_UID
        );
    }

    #[test]
    fn test_apply_payload_has_no_status() {
        let aquarium = create_test_aquarium(2, "atlanta");
        let mut deployment = build_deployment(&aquarium);
        deployment.status = Some(DeploymentStatus {
            ready_replicas: Some(2),
            ..Default::default()
        });

        let payload = to_apply_payload(&deployment).unwrap();
        assert!(payload.get("status").is_none());
        assert_eq!(payload["apiVersion"], "apps/v1");
        assert_eq!(payload["kind"], "Deployment");
        assert_eq!(payload["spec"]["replicas"], 2);
    }
}
