// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the specs.

pub use std::sync::Arc;
pub use sy_core::{Command, CommandContext, CommandSender, ErrorKind, Permission};
pub use sy_engine::{CommandManager, CommandOutcome, ManagerSettings, SimpleCoordinator};
pub use sy_parsers::{IntegerParser, StringParser};

use std::collections::HashSet;

/// A sender with a fixed permission set.
#[derive(Debug, Default)]
pub struct Player {
    permissions: HashSet<String>,
}

impl Player {
    pub fn new(permissions: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        })
    }
}

impl CommandSender for Player {
    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

pub type Manager = CommandManager<Player>;

pub fn manager() -> Manager {
    CommandManager::new(SimpleCoordinator)
}

pub fn manager_with(settings: ManagerSettings) -> Manager {
    CommandManager::with_settings(SimpleCoordinator, settings)
}

/// Execute and return the outcome, panicking on anything but success.
pub async fn succeed(manager: &Manager, input: &str) -> CommandContext<Player> {
    match manager.execute(Player::new(&[]), input).await {
        CommandOutcome::Success(result) => result.context,
        other => panic!("`{input}` did not succeed: {other:?}"),
    }
}

/// Execute and return the failure kind.
pub async fn fail_kind(manager: &Manager, input: &str) -> ErrorKind {
    match manager.execute(Player::new(&[]), input).await {
        CommandOutcome::Failed(failure) => failure.error.kind(),
        other => panic!("`{input}` did not fail: {other:?}"),
    }
}
