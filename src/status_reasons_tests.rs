// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `status_reasons` module

#[cfg(test)]
mod tests {
    use crate::status_reasons::*;

    #[test]
    fn test_default_reason_is_child_applied_success() {
        assert_eq!(ConditionReason::default(), ConditionReason::ChildAppliedSuccess);
        assert_eq!(ConditionReason::default().as_str(), "ChildAppliedSuccess");
    }

    #[test]
    fn test_reason_wire_values() {
        assert_eq!(
            ConditionReason::ErrorAddingOwnerReference.as_str(),
            "ErrorAddingOwnerReference"
        );
        assert_eq!(ConditionReason::ErrorCreatingChild.as_str(), "ErrorCreatingChild");
        assert_eq!(ConditionReason::ErrorGettingChild.as_str(), "ErrorGettingChild");
        assert_eq!(ConditionReason::ErrorUpdatingChild.as_str(), "ErrorUpdatingChild");
        assert_eq!(
            ConditionReason::ErrorUnmarshallingData.as_str(),
            "ErrorUnmarshallingData"
        );
        assert_eq!(ConditionReason::ErrorWatchingChild.as_str(), "ErrorWatchingChild");
        assert_eq!(ConditionReason::GvkNotSupported.as_str(), "GVKNotSupported");
    }

    #[test]
    fn test_reason_parses_every_known_code() {
        for reason in ConditionReason::ALL {
            let parsed: ConditionReason = reason.as_str().parse().unwrap();
            assert_eq!(parsed, reason);
        }
    }

    #[test]
    fn test_reason_rejects_unknown_code() {
        let err = "AllReady".parse::<ConditionReason>().unwrap_err();
        assert_eq!(err, UnknownReason("AllReady".to_string()));
        assert!(err.to_string().contains("AllReady"));
    }

    #[test]
    fn test_only_success_is_not_an_error() {
        let errors: Vec<_> = ConditionReason::ALL
            .into_iter()
            .filter(|r| !r.is_error())
            .collect();
        assert_eq!(errors, vec![ConditionReason::ChildAppliedSuccess]);
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(
            ConditionReason::ErrorGettingChild.to_string(),
            REASON_ERROR_GETTING_CHILD
        );
    }
}
