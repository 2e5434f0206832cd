// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the Faros GitOps controller.
//!
//! This module contains all string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for all Faros CRDs
pub const API_GROUP: &str = "faros.pusher.com";

/// API version for all Faros CRDs
pub const API_VERSION: &str = "v1alpha1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "faros.pusher.com/v1alpha1";

/// Kind name for `GitTrackObject` resource
pub const KIND_GIT_TRACK_OBJECT: &str = "GitTrackObject";

// ============================================================================
// Dry-Run Capability Constants
// ============================================================================

/// Group of the built-in kind used as a proxy for server-wide dry-run support
pub const DRY_RUN_REFERENCE_GROUP: &str = "";

/// Version of the built-in kind used as a proxy for server-wide dry-run support
pub const DRY_RUN_REFERENCE_VERSION: &str = "v1";

/// Kind used as a proxy for server-wide dry-run support
pub const DRY_RUN_REFERENCE_KIND: &str = "Namespace";

/// Query parameter the API server declares on operations that accept dry-run
pub const DRY_RUN_QUERY_PARAMETER: &str = "dryRun";

/// Path of the aggregated `OpenAPI` v2 document served by the API server
pub const OPENAPI_V2_PATH: &str = "/openapi/v2";

// ============================================================================
// Field Manager
// ============================================================================

/// Field manager name used for status patches
pub const FIELD_MANAGER: &str = "faros-controller";
