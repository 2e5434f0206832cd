// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for status reconciliation and dry-run capability checks.
//!
//! - [`CapabilityError`] - failures and negative answers from the dry-run verifier
//! - [`StatusError`] - failures writing a `GitTrackObject` status back to the API
//!
//! Collaborator failures (transport, API errors) are kept as the `source` of each
//! variant so callers can walk the full chain.

use thiserror::Error;

/// Errors returned by [`crate::dry_run::DryRunVerifier`].
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// The `OpenAPI` schema could not be fetched from the API server.
    ///
    /// Fatal for the probe: no fallback tier is attempted.
    #[error("failed to download openapi: {source}")]
    SchemaFetch {
        #[source]
        source: anyhow::Error,
    },

    /// The server does not support dry-run for the kind.
    ///
    /// This is a definitive answer rather than a probe failure. Callers should
    /// stop using dry-run for the kind.
    #[error("{gvk} doesn't support dry-run")]
    UnsupportedCapability {
        /// The kind, formatted as `group/version, Kind=kind`
        gvk: String,
    },

    /// Listing CustomResourceDefinitions failed during the last-resort check.
    #[error("failed to check CRD for {group_kind}: {source}")]
    CrdLookup {
        /// The group/kind being looked up
        group_kind: String,
        #[source]
        source: anyhow::Error,
    },

    /// A Kubernetes client could not be built from the connection config.
    #[error("error creating {client} client: {source}")]
    ClientConstruction {
        /// Which client failed ("dynamic" or "discovery")
        client: &'static str,
        #[source]
        source: kube::Error,
    },
}

impl CapabilityError {
    /// Whether this is the negative answer rather than a failure of the probe.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedCapability { .. })
    }

    /// Metric label for the error category.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::SchemaFetch { .. } => "schema_fetch",
            Self::UnsupportedCapability { .. } => "unsupported",
            Self::CrdLookup { .. } => "crd_lookup",
            Self::ClientConstruction { .. } => "client_construction",
        }
    }
}

/// Errors returned by [`crate::reconcilers::gittrackobject::update_status`].
#[derive(Error, Debug)]
pub enum StatusError {
    /// Writing the updated status to the API server failed.
    ///
    /// Conflicts from optimistic concurrency surface here as well; retries are
    /// left to the caller's reconciliation loop.
    #[error("unable to update GitTrackObject '{name}': {source}")]
    Persist {
        /// Name of the `GitTrackObject`
        name: String,
        #[source]
        source: anyhow::Error,
    },
}
