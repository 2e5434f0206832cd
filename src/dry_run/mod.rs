// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Dry-run capability verification.
//!
//! Sending a `dryRun` request to an API server that ignores the parameter
//! persists the object for real. [`DryRunVerifier`] decides, per kind, whether
//! the server honours dry-run before such a request is issued.
//!
//! # Decision Tiers
//!
//! 1. **Explicit match** - the server's `OpenAPI` document describes the kind.
//!    Its answer is final.
//! 2. **Namespace heuristic** - the kind is unknown to the document. If the
//!    built-in `Namespace` kind does not support dry-run, nothing does.
//! 3. **CRD lookup** - `Namespace` supports dry-run, so the unknown kind is
//!    supported only if a CRD registers its group and kind. This costs an extra
//!    round trip and only runs when the first two tiers are inconclusive.
//!
//! Transport failures at tier 1 or 3 are returned as errors; only "kind not in
//! the document" moves on to the next tier.
//!
//! # Example
//!
//! ```rust,no_run
//! use faros::dry_run::DryRunVerifier;
//! use kube::core::GroupVersionKind;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = kube::Config::infer().await?;
//! let verifier = DryRunVerifier::try_from_config(&config)?;
//!
//! let gvk = GroupVersionKind::gvk("apps", "v1", "Deployment");
//! match verifier.has_support(&gvk).await {
//!     Ok(()) => println!("dry-run supported"),
//!     Err(e) if e.is_unsupported() => println!("{e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod crd_finder;
pub mod openapi;

#[cfg(test)]
mod crd_finder_tests;

pub use crd_finder::{CrdFinder, DynamicCrdFinder, GroupKind};
pub use openapi::{DiscoveryClient, OpenApiDocument, OpenApiSchemaSource, SchemaSupport};

use crate::constants::{
    DRY_RUN_REFERENCE_GROUP, DRY_RUN_REFERENCE_KIND, DRY_RUN_REFERENCE_VERSION,
};
use crate::errors::CapabilityError;
use crate::metrics;
use kube::core::GroupVersionKind;
use kube::{Client, Config};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Tier that produced a [`CapabilityDecision`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionSource {
    /// The kind is described by the `OpenAPI` document.
    ExplicitMatch,
    /// The kind is unknown and `Namespace` does not support dry-run.
    NamespaceHeuristic,
    /// The kind is unknown, `Namespace` supports dry-run, and the CRD list decided.
    CrdLookup,
}

impl DecisionSource {
    /// Metric label for the tier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExplicitMatch => "explicit_match",
            Self::NamespaceHeuristic => "namespace_heuristic",
            Self::CrdLookup => "crd_lookup",
        }
    }
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a dry-run probe and the tier that decided it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapabilityDecision {
    pub supported: bool,
    pub source: DecisionSource,
}

/// Format a kind as `group/version, Kind=kind`.
#[must_use]
pub fn describe_gvk(gvk: &GroupVersionKind) -> String {
    format!("{}/{}, Kind={}", gvk.group, gvk.version, gvk.kind)
}

/// The built-in kind used as a proxy for server-wide dry-run support.
#[must_use]
pub fn reference_gvk() -> GroupVersionKind {
    GroupVersionKind::gvk(
        DRY_RUN_REFERENCE_GROUP,
        DRY_RUN_REFERENCE_VERSION,
        DRY_RUN_REFERENCE_KIND,
    )
}

/// Verifies whether a kind supports dry-run against the current server.
///
/// Holds no state between calls beyond its collaborators, so one instance can
/// serve concurrent probes. Results are not cached.
#[derive(Clone)]
pub struct DryRunVerifier {
    finder: Arc<dyn CrdFinder>,
    openapi: Arc<dyn OpenApiSchemaSource>,
}

impl DryRunVerifier {
    /// Build a verifier from already constructed collaborators.
    #[must_use]
    pub fn new(finder: Arc<dyn CrdFinder>, openapi: Arc<dyn OpenApiSchemaSource>) -> Self {
        Self { finder, openapi }
    }

    /// Build a verifier talking to the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::ClientConstruction`] if either the dynamic
    /// (CRD) client or the discovery (schema) client cannot be built. Both are
    /// built from the same `config`, so in practice a bad config is reported
    /// against the dynamic client, which is built first.
    pub fn try_from_config(config: &Config) -> Result<Self, CapabilityError> {
        let dynamic_client = Client::try_from(config.clone()).map_err(|source| {
            CapabilityError::ClientConstruction {
                client: "dynamic",
                source,
            }
        })?;
        let discovery_client = Client::try_from(config.clone()).map_err(|source| {
            CapabilityError::ClientConstruction {
                client: "discovery",
                source,
            }
        })?;

        Ok(Self::new(
            Arc::new(DynamicCrdFinder::new(dynamic_client)),
            Arc::new(DiscoveryClient::new(discovery_client)),
        ))
    }

    /// Verify that `gvk` supports dry-run.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::UnsupportedCapability`] naming `gvk` when the
    /// server does not support dry-run for it, and any error from [`Self::check`].
    pub async fn has_support(&self, gvk: &GroupVersionKind) -> Result<(), CapabilityError> {
        let decision = self.check(gvk).await?;
        if decision.supported {
            Ok(())
        } else {
            Err(CapabilityError::UnsupportedCapability {
                gvk: describe_gvk(gvk),
            })
        }
    }

    /// Decide whether `gvk` supports dry-run and report which tier decided.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::SchemaFetch`] if the `OpenAPI` document cannot be
    /// fetched, and [`CapabilityError::CrdLookup`] if the CRD list cannot be read.
    pub async fn check(
        &self,
        gvk: &GroupVersionKind,
    ) -> Result<CapabilityDecision, CapabilityError> {
        let start = Instant::now();
        let result = self.decide(gvk).await;

        match &result {
            Ok(decision) => {
                debug!(
                    "Dry-run support for {}: {} (decided by {})",
                    describe_gvk(gvk),
                    decision.supported,
                    decision.source
                );
                metrics::record_dry_run_decision(
                    decision.source.as_str(),
                    decision.supported,
                    start.elapsed(),
                );
            }
            Err(e) => {
                warn!("Dry-run probe for {} failed: {}", describe_gvk(gvk), e);
                metrics::record_dry_run_error(e.error_type(), start.elapsed());
            }
        }
        result
    }

    async fn decide(
        &self,
        gvk: &GroupVersionKind,
    ) -> Result<CapabilityDecision, CapabilityError> {
        let document = self
            .openapi
            .openapi_schema()
            .await
            .map_err(|source| CapabilityError::SchemaFetch { source })?;

        match document.supports_dry_run(gvk) {
            SchemaSupport::Supported => return Ok(explicit(true)),
            SchemaSupport::Unsupported => return Ok(explicit(false)),
            SchemaSupport::Unknown => {}
        }

        debug!(
            "{} not found in OpenAPI schema, checking {}",
            describe_gvk(gvk),
            DRY_RUN_REFERENCE_KIND
        );
        if document.supports_dry_run(&reference_gvk()) != SchemaSupport::Supported {
            return Ok(CapabilityDecision {
                supported: false,
                source: DecisionSource::NamespaceHeuristic,
            });
        }

        let group_kind = GroupKind::from(gvk);
        let supported = self
            .finder
            .has_crd(&group_kind)
            .await
            .map_err(|source| CapabilityError::CrdLookup {
                group_kind: group_kind.to_string(),
                source,
            })?;

        Ok(CapabilityDecision {
            supported,
            source: DecisionSource::CrdLookup,
        })
    }
}

fn explicit(supported: bool) -> CapabilityDecision {
    CapabilityDecision {
        supported,
        source: DecisionSource::ExplicitMatch,
    }
}
