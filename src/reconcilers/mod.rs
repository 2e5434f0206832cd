// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation support for `GitTrackObject` resources.
//!
//! # Reconciliation Architecture
//!
//! Each pass of the controller applies the tracked manifest as a child object
//! and then reports the result through the `ObjectInSync` condition:
//!
//! 1. **Apply** - Create or update the child object (owned by the caller)
//! 2. **Status** - Rebuild the status from the apply result
//! 3. **Diff** - Compare with the stored status
//! 4. **Write** - Persist only when something changed
//!
//! # Available Reconcilers
//!
//! - [`update_status`] - Writes a `GitTrackObject` status if it changed
//! - [`StatusReconciler`] - Same, bound to a status writer
//!
//! # Example
//!
//! ```rust,no_run
//! use faros::crd::GitTrackObject;
//! use faros::reconcilers::{StatusOptions, StatusReconciler};
//! use faros::status_reasons::ConditionReason;
//!
//! async fn report(client: kube::Client, gto: &GitTrackObject) -> anyhow::Result<()> {
//!     let reconciler = StatusReconciler::for_client(client);
//!     let opts = StatusOptions::new()
//!         .with_error(ConditionReason::ErrorUpdatingChild, "conflict");
//!     reconciler.reconcile(gto, &opts).await?;
//!     Ok(())
//! }
//! ```

pub mod gittrackobject;
pub mod status;

#[cfg(test)]
mod status_tests;

pub use gittrackobject::{
    apply_status, compute_status, update_status, KubeStatusWriter, StatusOptions,
    StatusReconciler, StatusWriter,
};
