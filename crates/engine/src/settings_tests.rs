// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_are_conservative() {
    let settings = ManagerSettings::default();
    assert!(!settings.allow_unsafe_registration);
    assert!(!settings.override_existing_commands);
    assert!(!settings.liberal_flag_parsing);
    assert!(!settings.root_command_deletion);
    assert_eq!(settings.max_exception_depth, DEFAULT_MAX_EXCEPTION_DEPTH);
}

#[test]
fn partial_json_fills_defaults() {
    let settings: ManagerSettings =
        serde_json::from_str(r#"{ "liberal_flag_parsing": true, "max_exception_depth": 3 }"#)
            .unwrap();
    assert_eq!(
        settings,
        ManagerSettings {
            liberal_flag_parsing: true,
            max_exception_depth: 3,
            ..ManagerSettings::default()
        }
    );
}
