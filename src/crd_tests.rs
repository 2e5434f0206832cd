// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod tests {
    use crate::constants::{API_GROUP, API_GROUP_VERSION, API_VERSION, KIND_GIT_TRACK_OBJECT};
    use crate::crd::*;
    use kube::{CustomResourceExt, Resource};
    use serde_json::json;

    #[test]
    fn test_gittrackobject_resource_identity() {
        assert_eq!(GitTrackObject::group(&()), API_GROUP);
        assert_eq!(GitTrackObject::version(&()), API_VERSION);
        assert_eq!(GitTrackObject::kind(&()), KIND_GIT_TRACK_OBJECT);
        assert_eq!(GitTrackObject::api_version(&()), API_GROUP_VERSION);
        assert_eq!(GitTrackObject::plural(&()), "gittrackobjects");
    }

    #[test]
    fn test_gittrackobject_crd_has_status_subresource() {
        let crd = GitTrackObject::crd();
        assert_eq!(crd.spec.scope, "Namespaced");

        let version = &crd.spec.versions[0];
        assert!(version
            .subresources
            .as_ref()
            .and_then(|s| s.status.as_ref())
            .is_some());
    }

    #[test]
    fn test_condition_type_wire_value() {
        let value = serde_json::to_value(GitTrackObjectConditionType::ObjectInSync).unwrap();
        assert_eq!(value, json!("ObjectInSync"));
        assert_eq!(
            GitTrackObjectConditionType::ObjectInSync.to_string(),
            "ObjectInSync"
        );
    }

    #[test]
    fn test_condition_status_display() {
        assert_eq!(ConditionStatus::True.to_string(), "True");
        assert_eq!(ConditionStatus::False.to_string(), "False");
        assert_eq!(ConditionStatus::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_status_deserializes_from_api_server() {
        let status: GitTrackObjectStatus = serde_json::from_value(json!({
            "conditions": [{
                "type": "ObjectInSync",
                "status": "False",
                "lastUpdateTime": "2025-01-01T00:00:00Z",
                "lastTransitionTime": "2025-01-01T00:00:00Z",
                "reason": "ErrorUpdatingChild",
                "message": "conflict"
            }]
        }))
        .unwrap();

        let condition = &status.conditions[0];
        assert_eq!(condition.r#type, GitTrackObjectConditionType::ObjectInSync);
        assert_eq!(condition.status, ConditionStatus::False);
        assert_eq!(condition.reason.as_deref(), Some("ErrorUpdatingChild"));
        assert_eq!(condition.message.as_deref(), Some("conflict"));
    }

    #[test]
    fn test_status_without_conditions_defaults_empty() {
        let status: GitTrackObjectStatus = serde_json::from_value(json!({})).unwrap();
        assert!(status.conditions.is_empty());
    }

    #[test]
    fn test_spec_serializes_data_as_string() {
        let gto = GitTrackObject::new(
            "configmap-settings",
            GitTrackObjectSpec {
                name: "settings".to_string(),
                kind: "ConfigMap".to_string(),
                data: r#"{"kind":"ConfigMap"}"#.to_string(),
            },
        );
        let value = serde_json::to_value(&gto).unwrap();

        assert_eq!(value["apiVersion"], API_GROUP_VERSION);
        assert_eq!(value["spec"]["kind"], "ConfigMap");
        assert_eq!(value["spec"]["data"], r#"{"kind":"ConfigMap"}"#);
    }
}
