// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for Git-tracked objects.
//!
//! A [`GitTrackObject`] wraps a single Kubernetes manifest that was read from a
//! Git repository. The controller applies the wrapped manifest as a child object
//! and reports the outcome through a single `ObjectInSync` status condition.
//!
//! # Example: Creating a `GitTrackObject`
//!
//! ```rust,no_run
//! use faros::crd::{GitTrackObject, GitTrackObjectSpec};
//!
//! let spec = GitTrackObjectSpec {
//!     name: "nginx".to_string(),
//!     kind: "Deployment".to_string(),
//!     data: r#"{"apiVersion":"apps/v1","kind":"Deployment"}"#.to_string(),
//! };
//! let gto = GitTrackObject::new("deployment-nginx", spec);
//! assert!(gto.status.is_none());
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a `GitTrackObject` status condition.
///
/// Only one condition type is recognized: whether the child object is in sync
/// with the manifest held by the `GitTrackObject`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum GitTrackObjectConditionType {
    /// The child object matches the tracked manifest.
    #[serde(rename = "ObjectInSync")]
    ObjectInSync,
}

impl GitTrackObjectConditionType {
    /// Wire representation of the condition type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ObjectInSync => "ObjectInSync",
        }
    }
}

impl fmt::Display for GitTrackObjectConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a condition: True, False, or Unknown.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Condition represents an observation of a `GitTrackObject`'s current state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitTrackObjectCondition {
    /// Type of condition.
    pub r#type: GitTrackObjectConditionType,

    /// Status of the condition: True, False, or Unknown.
    pub status: ConditionStatus,

    /// Last time this condition was updated (RFC3339 format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GitTrackObject` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct GitTrackObjectStatus {
    /// Conditions, at most one per type, in insertion order.
    #[serde(default)]
    pub conditions: Vec<GitTrackObjectCondition>,
}

/// `GitTrackObject` holds one Kubernetes manifest tracked from a Git repository.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
#[kube(
    group = "faros.pusher.com",
    version = "v1alpha1",
    kind = "GitTrackObject",
    namespaced,
    derive = "PartialEq",
    doc = "GitTrackObject wraps a single Kubernetes manifest read from Git. The controller applies it as a child object and reports whether the child is in sync."
)]
#[kube(status = "GitTrackObjectStatus")]
#[serde(rename_all = "camelCase")]
pub struct GitTrackObjectSpec {
    /// Name of the child object.
    pub name: String,

    /// Kind of the child object (e.g., "Deployment").
    pub kind: String,

    /// The child manifest as raw JSON.
    pub data: String,
}
