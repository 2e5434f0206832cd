// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Live lookup of CustomResourceDefinitions by group and kind.

use anyhow::Context as _;
use async_trait::async_trait;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::ListParams;
use kube::core::GroupVersionKind;
use kube::{Api, Client};
use std::fmt;
use tracing::debug;

/// API group and kind, without a version.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl GroupKind {
    #[must_use]
    pub fn new(group: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            kind: kind.to_string(),
        }
    }
}

impl From<&GroupVersionKind> for GroupKind {
    fn from(gvk: &GroupVersionKind) -> Self {
        Self::new(&gvk.group, &gvk.kind)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// Answers whether a CRD registers a group and kind.
#[async_trait]
pub trait CrdFinder: Send + Sync {
    /// Whether a CRD for `group_kind` is installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the CRDs cannot be listed.
    async fn has_crd(&self, group_kind: &GroupKind) -> anyhow::Result<bool>;
}

/// [`CrdFinder`] that lists `apiextensions.k8s.io/v1` CRDs from the API server.
#[derive(Clone)]
pub struct DynamicCrdFinder {
    client: Client,
}

impl DynamicCrdFinder {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrdFinder for DynamicCrdFinder {
    async fn has_crd(&self, group_kind: &GroupKind) -> anyhow::Result<bool> {
        let api: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        let crds = api
            .list(&ListParams::default())
            .await
            .context("listing CustomResourceDefinitions")?;

        let found = crds.items.iter().any(|crd| {
            crd.spec.group == group_kind.group && crd.spec.names.kind == group_kind.kind
        });
        debug!(
            "CRD lookup for {}: {} ({} CRDs installed)",
            group_kind,
            found,
            crds.items.len()
        );
        Ok(found)
    }
}
