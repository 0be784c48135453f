// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The sender driving the CLI.

use parking_lot::Mutex;
use std::collections::HashSet;
use sy_core::CommandSender;

/// Either the console, which holds every permission, or a named user with an
/// explicit permission set. Messages sent by handlers are buffered until the
/// session prints them.
#[derive(Debug, Default)]
pub struct ConsoleSender {
    name: String,
    permissions: HashSet<String>,
    console: bool,
    messages: Mutex<Vec<String>>,
}

impl ConsoleSender {
    pub fn console() -> Self {
        Self {
            name: "console".to_string(),
            console: true,
            ..Self::default()
        }
    }

    pub fn user(name: &str, permissions: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.to_string(),
            permissions: permissions.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_console(&self) -> bool {
        self.console
    }

    pub fn send(&self, message: impl Into<String>) {
        self.messages.lock().push(message.into());
    }

    /// Take every buffered message.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl CommandSender for ConsoleSender {
    fn has_permission(&self, permission: &str) -> bool {
        self.console || self.permissions.contains(permission)
    }
}

#[cfg(test)]
#[path = "sender_tests.rs"]
mod tests;
