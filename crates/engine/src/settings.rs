// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manager settings

use serde::{Deserialize, Serialize};

/// Translation depth after which the exception controller gives up.
pub const DEFAULT_MAX_EXCEPTION_DEPTH: usize = 16;

/// Behaviour switches for a [`crate::CommandManager`].
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSettings {
    /// Allow registering commands after `lock_registration()`.
    pub allow_unsafe_registration: bool,
    /// Replace a command registered on the same path instead of failing.
    pub override_existing_commands: bool,
    /// Accept known flags between positional arguments.
    pub liberal_flag_parsing: bool,
    /// Allow `delete_root_command()`.
    pub root_command_deletion: bool,
    /// Bound on re-entrant exception translation.
    pub max_exception_depth: usize,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            allow_unsafe_registration: false,
            override_existing_commands: false,
            liberal_flag_parsing: false,
            root_command_deletion: false,
            max_exception_depth: DEFAULT_MAX_EXCEPTION_DEPTH,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
