// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status condition helpers for `GitTrackObject` resources.
//!
//! This module provides utility functions for creating and managing the
//! conditions held in a [`GitTrackObjectStatus`].
//!
//! # Condition Format
//!
//! - `type`: The aspect of the resource being reported (`ObjectInSync`)
//! - `status`: "True", "False", or "Unknown"
//! - `reason`: A programmatic identifier (CamelCase)
//! - `message`: A human-readable explanation, omitted when empty
//! - `lastUpdateTime`: RFC3339 timestamp of the last change to the condition
//! - `lastTransitionTime`: RFC3339 timestamp of the last status flip
//!
//! # Example
//!
//! ```rust
//! use faros::crd::{ConditionStatus, GitTrackObjectConditionType, GitTrackObjectStatus};
//! use faros::reconcilers::status::{find_condition, new_condition, set_condition};
//! use faros::status_reasons::ConditionReason;
//!
//! let mut status = GitTrackObjectStatus::default();
//! set_condition(
//!     &mut status,
//!     new_condition(
//!         GitTrackObjectConditionType::ObjectInSync,
//!         ConditionStatus::True,
//!         ConditionReason::ChildAppliedSuccess,
//!         "",
//!     ),
//! );
//! let cond = find_condition(&status.conditions, GitTrackObjectConditionType::ObjectInSync);
//! assert_eq!(cond.map(|c| c.status), Some(ConditionStatus::True));
//! ```

use crate::crd::{
    ConditionStatus, GitTrackObjectCondition, GitTrackObjectConditionType, GitTrackObjectStatus,
};
use crate::status_reasons::ConditionReason;

/// Create a new condition without transition metadata.
///
/// Timestamps are left empty so that building a condition is a pure function of
/// its inputs. [`stamp_transition_times`] fills them in against the previous
/// status. An empty `message` is stored as `None`, matching how the API server
/// returns an omitted field.
#[must_use]
pub fn new_condition(
    condition_type: GitTrackObjectConditionType,
    status: ConditionStatus,
    reason: ConditionReason,
    message: &str,
) -> GitTrackObjectCondition {
    GitTrackObjectCondition {
        r#type: condition_type,
        status,
        last_update_time: None,
        last_transition_time: None,
        reason: Some(reason.as_str().to_string()),
        message: (!message.is_empty()).then(|| message.to_string()),
    }
}

/// Find a condition by type in a list of conditions.
#[must_use]
pub fn find_condition(
    conditions: &[GitTrackObjectCondition],
    condition_type: GitTrackObjectConditionType,
) -> Option<&GitTrackObjectCondition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

/// Update or append a condition (in-memory, no API call).
///
/// A condition of the same type is replaced in place so its position in the
/// sequence is preserved. Otherwise the condition is appended.
pub fn set_condition(status: &mut GitTrackObjectStatus, condition: GitTrackObjectCondition) {
    if let Some(existing) = status
        .conditions
        .iter_mut()
        .find(|c| c.r#type == condition.r#type)
    {
        *existing = condition;
    } else {
        status.conditions.push(condition);
    }
}

/// Fill in transition metadata for freshly built conditions.
///
/// Each condition in `next` is matched by type against `previous`:
///
/// - unchanged status, reason and message: both timestamps are carried over
/// - unchanged status only: `lastTransitionTime` is carried over, `lastUpdateTime` is `now`
/// - anything else: both timestamps are `now`
///
/// Carrying timestamps over for unchanged conditions keeps a structural
/// comparison of the two statuses equal when nothing changed.
pub fn stamp_transition_times(
    previous: &[GitTrackObjectCondition],
    next: &mut [GitTrackObjectCondition],
    now: &str,
) {
    for condition in next.iter_mut() {
        match find_condition(previous, condition.r#type) {
            Some(prev) if prev.status == condition.status => {
                let unchanged = prev.reason == condition.reason && prev.message == condition.message;
                condition.last_transition_time = prev
                    .last_transition_time
                    .clone()
                    .or_else(|| Some(now.to_string()));
                condition.last_update_time = if unchanged {
                    prev.last_update_time.clone().or_else(|| Some(now.to_string()))
                } else {
                    Some(now.to_string())
                };
            }
            _ => {
                condition.last_transition_time = Some(now.to_string());
                condition.last_update_time = Some(now.to_string());
            }
        }
    }
}
