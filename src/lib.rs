// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # Faros - GitOps building blocks for Kubernetes
//!
//! Faros keeps Kubernetes objects in sync with manifests stored in Git. Each
//! manifest is wrapped in a [`GitTrackObject`](crd::GitTrackObject) custom
//! resource, applied as a child object, and reported on through the resource's
//! status.
//!
//! ## Overview
//!
//! This library provides two pieces of the controller:
//!
//! - Status reconciliation that writes a `GitTrackObject` status only when it changed
//! - Dry-run capability verification for arbitrary Group/Version/Kinds
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types
//! - [`reconcilers`] - Status computation and persistence
//! - [`dry_run`] - Server-side dry-run support detection
//! - [`status_reasons`] - Condition reason codes
//! - [`errors`] - Error types
//! - [`metrics`] - Prometheus metrics
//!
//! ## Example
//!
//! ```rust,no_run
//! use faros::dry_run::DryRunVerifier;
//! use kube::core::GroupVersionKind;
//!
//! # async fn run() -> anyhow::Result<()> {
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

pub mod constants;
pub mod crd;
pub mod dry_run;
pub mod errors;
pub mod metrics;
pub mod reconcilers;
pub mod status_reasons;

#[cfg(test)]
mod crd_tests;
#[cfg(test)]
mod status_reasons_tests;
