// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `status.rs`

#[cfg(test)]
mod tests {
    use crate::crd::{
        ConditionStatus, GitTrackObjectCondition, GitTrackObjectConditionType,
        GitTrackObjectStatus,
    };
    use crate::reconcilers::status::{
        find_condition, new_condition, set_condition, stamp_transition_times,
    };
    use crate::status_reasons::ConditionReason;

    const IN_SYNC: GitTrackObjectConditionType = GitTrackObjectConditionType::ObjectInSync;
    const EARLIER: &str = "2025-01-01T00:00:00+00:00";
    const NOW: &str = "2025-06-01T12:00:00+00:00";

    fn stamped(
        status: ConditionStatus,
        reason: ConditionReason,
        message: &str,
        time: &str,
    ) -> GitTrackObjectCondition {
        GitTrackObjectCondition {
            last_update_time: Some(time.to_string()),
            last_transition_time: Some(time.to_string()),
            ..new_condition(IN_SYNC, status, reason, message)
        }
    }

    #[test]
    fn test_new_condition_basic() {
        let condition = new_condition(
            IN_SYNC,
            ConditionStatus::False,
            ConditionReason::ErrorCreatingChild,
            "namespaces \"demo\" not found",
        );

        assert_eq!(condition.r#type, IN_SYNC);
        assert_eq!(condition.status, ConditionStatus::False);
        assert_eq!(condition.reason.as_deref(), Some("ErrorCreatingChild"));
        assert_eq!(
            condition.message.as_deref(),
            Some("namespaces \"demo\" not found")
        );
        assert!(condition.last_update_time.is_none());
        assert!(condition.last_transition_time.is_none());
    }

    #[test]
    fn test_new_condition_empty_message_is_omitted() {
        let condition = new_condition(
            IN_SYNC,
            ConditionStatus::True,
            ConditionReason::ChildAppliedSuccess,
            "",
        );
        assert!(condition.message.is_none());
    }

    #[test]
    fn test_set_condition_appends_when_missing() {
        let mut status = GitTrackObjectStatus::default();
        set_condition(
            &mut status,
            new_condition(IN_SYNC, ConditionStatus::True, ConditionReason::default(), ""),
        );

        assert_eq!(status.conditions.len(), 1);
        assert!(find_condition(&status.conditions, IN_SYNC).is_some());
    }

    #[test]
    fn test_set_condition_replaces_in_place() {
        let mut status = GitTrackObjectStatus::default();
        set_condition(
            &mut status,
            new_condition(IN_SYNC, ConditionStatus::True, ConditionReason::default(), ""),
        );
        set_condition(
            &mut status,
            new_condition(
                IN_SYNC,
                ConditionStatus::False,
                ConditionReason::ErrorGettingChild,
                "timeout",
            ),
        );

        assert_eq!(status.conditions.len(), 1);
        assert_eq!(status.conditions[0].status, ConditionStatus::False);
        assert_eq!(status.conditions[0].message.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_find_condition_with_empty_list() {
        assert!(find_condition(&[], IN_SYNC).is_none());
    }

    #[test]
    fn test_stamp_new_condition_uses_now() {
        let mut next = vec![new_condition(
            IN_SYNC,
            ConditionStatus::True,
            ConditionReason::default(),
            "",
        )];
        stamp_transition_times(&[], &mut next, NOW);

        assert_eq!(next[0].last_update_time.as_deref(), Some(NOW));
        assert_eq!(next[0].last_transition_time.as_deref(), Some(NOW));
    }

    #[test]
    fn test_stamp_unchanged_condition_keeps_timestamps() {
        let previous = vec![stamped(
            ConditionStatus::True,
            ConditionReason::ChildAppliedSuccess,
            "",
            EARLIER,
        )];
        let mut next = vec![new_condition(
            IN_SYNC,
            ConditionStatus::True,
            ConditionReason::ChildAppliedSuccess,
            "",
        )];
        stamp_transition_times(&previous, &mut next, NOW);

        assert_eq!(next, previous);
    }

    #[test]
    fn test_stamp_same_status_new_message_keeps_transition_time() {
        let previous = vec![stamped(
            ConditionStatus::False,
            ConditionReason::ErrorUpdatingChild,
            "first failure",
            EARLIER,
        )];
        let mut next = vec![new_condition(
            IN_SYNC,
            ConditionStatus::False,
            ConditionReason::ErrorUpdatingChild,
            "second failure",
        )];
        stamp_transition_times(&previous, &mut next, NOW);

        assert_eq!(next[0].last_transition_time.as_deref(), Some(EARLIER));
        assert_eq!(next[0].last_update_time.as_deref(), Some(NOW));
    }

    #[test]
    fn test_stamp_status_flip_resets_both_timestamps() {
        let previous = vec![stamped(
            ConditionStatus::False,
            ConditionReason::ErrorUpdatingChild,
            "failure",
            EARLIER,
        )];
        let mut next = vec![new_condition(
            IN_SYNC,
            ConditionStatus::True,
            ConditionReason::ChildAppliedSuccess,
            "",
        )];
        stamp_transition_times(&previous, &mut next, NOW);

        assert_eq!(next[0].last_transition_time.as_deref(), Some(NOW));
        assert_eq!(next[0].last_update_time.as_deref(), Some(NOW));
    }

    #[test]
    fn test_condition_serializes_with_wire_names() {
        let condition = stamped(
            ConditionStatus::True,
            ConditionReason::ChildAppliedSuccess,
            "",
            EARLIER,
        );
        let value = serde_json::to_value(&condition).unwrap();

        assert_eq!(value["type"], "ObjectInSync");
        assert_eq!(value["status"], "True");
        assert_eq!(value["reason"], "ChildAppliedSuccess");
        assert_eq!(value["lastTransitionTime"], EARLIER);
        assert!(value.get("message").is_none());
    }
}
