// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `crd_finder.rs`

#[cfg(test)]
mod tests {
    use crate::dry_run::crd_finder::GroupKind;
    use kube::core::GroupVersionKind;

    #[test]
    fn test_group_kind_from_gvk_drops_version() {
        let gvk = GroupVersionKind::gvk("example.com", "v1", "Widget");
        let gk = GroupKind::from(&gvk);

        assert_eq!(gk, GroupKind::new("example.com", "Widget"));
    }

    #[test]
    fn test_group_kind_display() {
        assert_eq!(
            GroupKind::new("example.com", "Widget").to_string(),
            "Widget.example.com"
        );
        assert_eq!(GroupKind::new("", "Namespace").to_string(), "Namespace");
    }
}
