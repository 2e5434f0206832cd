// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status condition reasons for `GitTrackObject` resources.
//!
//! Reasons are programmatic identifiers in CamelCase that explain why the
//! `ObjectInSync` condition has a particular status.
//!
//! # Example Status
//!
//! ```yaml
//! status:
//!   conditions:
//!     - type: ObjectInSync
//!       status: "False"
//!       reason: ErrorUpdatingChild
//!       message: "deployments.apps \"nginx\" is forbidden"
//!       lastUpdateTime: "2025-01-01T00:00:00+00:00"
//!       lastTransitionTime: "2025-01-01T00:00:00+00:00"
//! ```

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Success Reasons
// ============================================================================

/// The child object was applied successfully.
pub const REASON_CHILD_APPLIED_SUCCESS: &str = "ChildAppliedSuccess";

// ============================================================================
// Failure Reasons
// ============================================================================

/// Setting the owner reference on the child failed.
pub const REASON_ERROR_ADDING_OWNER_REFERENCE: &str = "ErrorAddingOwnerReference";

/// Creating the child object failed.
pub const REASON_ERROR_CREATING_CHILD: &str = "ErrorCreatingChild";

/// Reading the current child object failed.
pub const REASON_ERROR_GETTING_CHILD: &str = "ErrorGettingChild";

/// Updating the child object failed.
pub const REASON_ERROR_UPDATING_CHILD: &str = "ErrorUpdatingChild";

/// The manifest held in `spec.data` could not be decoded.
pub const REASON_ERROR_UNMARSHALLING_DATA: &str = "ErrorUnmarshallingData";

/// Starting a watch on the child's kind failed.
pub const REASON_ERROR_WATCHING_CHILD: &str = "ErrorWatchingChild";

/// The API server does not support dry-run for the child's kind.
pub const REASON_GVK_NOT_SUPPORTED: &str = "GVKNotSupported";

/// Reason code carried by the `ObjectInSync` condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConditionReason {
    #[default]
    ChildAppliedSuccess,
    ErrorAddingOwnerReference,
    ErrorCreatingChild,
    ErrorGettingChild,
    ErrorUpdatingChild,
    ErrorUnmarshallingData,
    ErrorWatchingChild,
    GvkNotSupported,
}

impl ConditionReason {
    /// All reasons, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ChildAppliedSuccess,
        Self::ErrorAddingOwnerReference,
        Self::ErrorCreatingChild,
        Self::ErrorGettingChild,
        Self::ErrorUpdatingChild,
        Self::ErrorUnmarshallingData,
        Self::ErrorWatchingChild,
        Self::GvkNotSupported,
    ];

    /// Wire representation of the reason.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChildAppliedSuccess => REASON_CHILD_APPLIED_SUCCESS,
            Self::ErrorAddingOwnerReference => REASON_ERROR_ADDING_OWNER_REFERENCE,
            Self::ErrorCreatingChild => REASON_ERROR_CREATING_CHILD,
            Self::ErrorGettingChild => REASON_ERROR_GETTING_CHILD,
            Self::ErrorUpdatingChild => REASON_ERROR_UPDATING_CHILD,
            Self::ErrorUnmarshallingData => REASON_ERROR_UNMARSHALLING_DATA,
            Self::ErrorWatchingChild => REASON_ERROR_WATCHING_CHILD,
            Self::GvkNotSupported => REASON_GVK_NOT_SUPPORTED,
        }
    }

    /// Whether the reason describes a failure.
    #[must_use]
    pub fn is_error(self) -> bool {
        !matches!(self, Self::ChildAppliedSuccess)
    }
}

impl fmt::Display for ConditionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized reason code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown condition reason '{0}'")]
pub struct UnknownReason(pub String);

impl FromStr for ConditionReason {
    type Err = UnknownReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| UnknownReason(s.to_string()))
    }
}
