// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `GitTrackObject` status reconciliation.
//!
//! The reconciler rebuilds the resource's status from scratch on every pass,
//! compares it with the status stored on the resource, and writes it back only
//! when the two differ. Every status write triggers a watch event and another
//! reconciliation, so an unchanged status must never be written.
//!
//! The flow is snapshot, pure compute, structural diff, then a guarded write:
//!
//! 1. Clone the original resource
//! 2. [`compute_status`] from the [`StatusOptions`] (no I/O)
//! 3. Stamp transition times and compare with the stored status
//! 4. Persist through a [`StatusWriter`] only if the status changed

use crate::constants::FIELD_MANAGER;
use crate::crd::{
    ConditionStatus, GitTrackObject, GitTrackObjectConditionType, GitTrackObjectStatus,
};
use crate::errors::StatusError;
use crate::metrics;
use crate::reconcilers::status::{new_condition, set_condition, stamp_transition_times};
use crate::status_reasons::ConditionReason;
use anyhow::{anyhow, Context as _};
use async_trait::async_trait;
use chrono::Utc;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Inputs for one status computation.
///
/// Built by the caller for each reconciliation attempt and discarded afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusOptions {
    /// Failure applying the child object, if any
    pub in_sync_error: Option<String>,
    /// Reason code for the `ObjectInSync` condition
    pub in_sync_reason: ConditionReason,
}

impl StatusOptions {
    /// Options for a successful pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure with the given reason.
    #[must_use]
    pub fn with_error(mut self, reason: ConditionReason, error: impl fmt::Display) -> Self {
        self.in_sync_reason = reason;
        self.in_sync_error = Some(error.to_string());
        self
    }

    /// Override the reason without recording a failure.
    #[must_use]
    pub fn with_reason(mut self, reason: ConditionReason) -> Self {
        self.in_sync_reason = reason;
        self
    }
}

/// Write path for `GitTrackObject` status.
///
/// Implementations receive the full resource with its new status and must
/// surface optimistic-concurrency conflicts as errors.
#[async_trait]
pub trait StatusWriter: Send + Sync {
    /// Persist the status of `gto`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected or the API server is unreachable.
    async fn update(&self, gto: &GitTrackObject) -> anyhow::Result<()>;
}

/// [`StatusWriter`] backed by the Kubernetes status subresource.
///
/// Sends a merge patch that carries the resource's `resourceVersion`, so a
/// stale write fails with a conflict instead of overwriting newer state.
#[derive(Clone)]
pub struct KubeStatusWriter {
    client: Client,
}

impl KubeStatusWriter {
    /// Writer patching status through `client`.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusWriter for KubeStatusWriter {
    async fn update(&self, gto: &GitTrackObject) -> anyhow::Result<()> {
        let namespace = gto
            .namespace()
            .ok_or_else(|| anyhow!("GitTrackObject {} has no namespace", gto.name_any()))?;
        let api: Api<GitTrackObject> = Api::namespaced(self.client.clone(), &namespace);

        let patch = json!({
            "metadata": {
                "resourceVersion": gto.resource_version(),
            },
            "status": gto.status,
        });
        let params = PatchParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..PatchParams::default()
        };

        api.patch_status(&gto.name_any(), &params, &Patch::Merge(&patch))
            .await
            .with_context(|| format!("patching status of {}/{}", namespace, gto.name_any()))?;
        Ok(())
    }
}

/// Compute the status described by `opts`.
///
/// Pure function: equal options always produce equal statuses. The single
/// `ObjectInSync` condition is `False` with the error text as message when
/// `opts` carries an error, and `True` with an empty message otherwise.
#[must_use]
pub fn compute_status(opts: &StatusOptions) -> GitTrackObjectStatus {
    let mut status = GitTrackObjectStatus::default();

    let condition = match &opts.in_sync_error {
        Some(err) => new_condition(
            GitTrackObjectConditionType::ObjectInSync,
            ConditionStatus::False,
            opts.in_sync_reason,
            err,
        ),
        None => new_condition(
            GitTrackObjectConditionType::ObjectInSync,
            ConditionStatus::True,
            opts.in_sync_reason,
            "",
        ),
    };
    set_condition(&mut status, condition);

    status
}

/// Replace the status of `gto` if the computed status differs from it.
///
/// Comparison is full structural equality and sensitive to condition order.
/// A resource without a status is always updated. `now` is the RFC3339 time
/// used for conditions that changed.
///
/// Returns `true` if `gto.status` was replaced.
pub fn apply_status(gto: &mut GitTrackObject, opts: &StatusOptions, now: &str) -> bool {
    let mut status = compute_status(opts);
    let previous = gto
        .status
        .as_ref()
        .map(|s| s.conditions.as_slice())
        .unwrap_or_default();
    stamp_transition_times(previous, &mut status.conditions, now);

    if gto.status.as_ref() == Some(&status) {
        return false;
    }
    gto.status = Some(status);
    true
}

/// Compute a new status for `original` and write it back if it changed.
///
/// `original` is never modified. At most one write is issued.
///
/// Returns `true` if a write was issued.
///
/// # Errors
///
/// Returns [`StatusError::Persist`] if the write fails. The write is not retried.
pub async fn update_status<W>(
    writer: &W,
    original: &GitTrackObject,
    opts: &StatusOptions,
) -> Result<bool, StatusError>
where
    W: StatusWriter + ?Sized,
{
    let mut gto = original.clone();
    let name = gto.name_any();

    if !apply_status(&mut gto, opts, &Utc::now().to_rfc3339()) {
        debug!("GitTrackObject {} status unchanged, skipping update", name);
        metrics::record_status_unchanged();
        return Ok(false);
    }

    info!("Updating GitTrackObject {} status", name);
    if let Err(source) = writer.update(&gto).await {
        metrics::record_status_error();
        return Err(StatusError::Persist { name, source });
    }
    metrics::record_status_updated();
    Ok(true)
}

/// Status reconciler bound to a [`StatusWriter`].
#[derive(Clone)]
pub struct StatusReconciler {
    writer: Arc<dyn StatusWriter>,
}

impl StatusReconciler {
    /// Reconciler persisting through `writer`.
    #[must_use]
    pub fn new(writer: Arc<dyn StatusWriter>) -> Self {
        Self { writer }
    }

    /// Reconciler writing through the Kubernetes API.
    #[must_use]
    pub fn for_client(client: Client) -> Self {
        Self::new(Arc::new(KubeStatusWriter::new(client)))
    }

    /// See [`update_status`].
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::Persist`] if the write fails.
    pub async fn reconcile(
        &self,
        original: &GitTrackObject,
        opts: &StatusOptions,
    ) -> Result<bool, StatusError> {
        update_status(self.writer.as_ref(), original, opts).await
    }
}
