// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `OpenAPI` v2 schema lookup for dry-run support.
//!
//! The API server publishes an aggregated `OpenAPI` v2 document at `/openapi/v2`.
//! Every write operation in that document is tagged with the
//! `x-kubernetes-group-version-kind` vendor extension. A kind supports dry-run
//! when its `patch` operation declares the `dryRun` query parameter.

use crate::constants::{DRY_RUN_QUERY_PARAMETER, OPENAPI_V2_PATH};
use anyhow::Context as _;
use async_trait::async_trait;
use kube::core::GroupVersionKind;
use kube::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Answer of a single schema lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaSupport {
    /// The kind is described and its patch operation accepts `dryRun`.
    Supported,
    /// The kind is described but its patch operation does not accept `dryRun`.
    Unsupported,
    /// No operation in the document is tagged with the kind.
    Unknown,
}

/// Subset of an `OpenAPI` v2 document needed to answer dry-run lookups.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OpenApiDocument {
    #[serde(default)]
    paths: BTreeMap<String, PathItem>,

    /// Shared parameters referenced from operations via `$ref`.
    #[serde(default)]
    parameters: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct PathItem {
    #[serde(default)]
    patch: Option<Operation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct Operation {
    #[serde(default)]
    parameters: Vec<Value>,

    #[serde(default, rename = "x-kubernetes-group-version-kind")]
    group_version_kind: Option<Value>,
}

impl Operation {
    /// Whether the operation's vendor extension names `gvk`.
    ///
    /// Extensions that are not a `{group, version, kind}` object never match.
    fn describes(&self, gvk: &GroupVersionKind) -> bool {
        let Some(ext) = self.group_version_kind.as_ref() else {
            return false;
        };
        let field = |name: &str| ext.get(name).and_then(Value::as_str);
        field("group") == Some(gvk.group.as_str())
            && field("version") == Some(gvk.version.as_str())
            && field("kind") == Some(gvk.kind.as_str())
    }
}

impl OpenApiDocument {
    /// Wrap an already decoded document.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not shaped like an `OpenAPI` v2 document.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Number of paths in the document.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Look up whether `gvk` supports dry-run.
    ///
    /// The first path whose `patch` operation is tagged with `gvk` decides.
    #[must_use]
    pub fn supports_dry_run(&self, gvk: &GroupVersionKind) -> SchemaSupport {
        let Some(operation) = self
            .paths
            .values()
            .filter_map(|item| item.patch.as_ref())
            .find(|op| op.describes(gvk))
        else {
            return SchemaSupport::Unknown;
        };

        if operation
            .parameters
            .iter()
            .any(|param| self.is_dry_run_parameter(param))
        {
            SchemaSupport::Supported
        } else {
            SchemaSupport::Unsupported
        }
    }

    fn is_dry_run_parameter(&self, param: &Value) -> bool {
        let resolved = match param.get("$ref").and_then(Value::as_str) {
            Some(reference) => match reference
                .strip_prefix("#/parameters/")
                .and_then(|name| self.parameters.get(name))
            {
                Some(shared) => shared,
                None => return false,
            },
            None => param,
        };

        let name = resolved.get("name").and_then(Value::as_str);
        let location = resolved.get("in").and_then(Value::as_str);
        name == Some(DRY_RUN_QUERY_PARAMETER) && location.is_none_or(|l| l == "query")
    }
}

/// Source of the server's `OpenAPI` document.
#[async_trait]
pub trait OpenApiSchemaSource: Send + Sync {
    /// Fetch the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or decoded.
    async fn openapi_schema(&self) -> anyhow::Result<OpenApiDocument>;
}

/// [`OpenApiSchemaSource`] that downloads `/openapi/v2` from the API server.
#[derive(Clone)]
pub struct DiscoveryClient {
    client: Client,
}

impl DiscoveryClient {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OpenApiSchemaSource for DiscoveryClient {
    async fn openapi_schema(&self) -> anyhow::Result<OpenApiDocument> {
        debug!("Downloading OpenAPI schema from {}", OPENAPI_V2_PATH);
        let request = http::Request::get(OPENAPI_V2_PATH)
            .header(http::header::ACCEPT, "application/json")
            .body(Vec::new())
            .context("building openapi request")?;

        let document: OpenApiDocument = self
            .client
            .request(request)
            .await
            .with_context(|| format!("GET {OPENAPI_V2_PATH}"))?;
        debug!("Downloaded OpenAPI schema with {} paths", document.path_count());
        Ok(document)
    }
}
