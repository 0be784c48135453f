// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A command manager bound to one sender, turning outcomes into output.

use crate::demo;
use crate::sender::ConsoleSender;
use crate::CoordinatorKind;
use anyhow::Result;
use std::sync::Arc;
use sy_engine::{
    AsyncCoordinator, CommandManager, CommandOutcome, ConfirmationManager, LockingCoordinator,
    ManagerSettings, SimpleCoordinator,
};

/// Output produced by one input line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub failed: bool,
}

pub struct Session {
    manager: Arc<CommandManager<ConsoleSender>>,
    confirmations: ConfirmationManager<ConsoleSender>,
    sender: Arc<ConsoleSender>,
}

impl Session {
    pub fn new(settings: ManagerSettings, coordinator: CoordinatorKind, sender: ConsoleSender) -> Result<Self> {
        let manager = Arc::new(match coordinator {
            CoordinatorKind::Simple => CommandManager::with_settings(SimpleCoordinator, settings),
            CoordinatorKind::Async => CommandManager::with_settings(AsyncCoordinator::new(), settings),
            CoordinatorKind::Locking => {
                CommandManager::with_settings(LockingCoordinator::new(AsyncCoordinator::new()), settings)
            }
        });
        let confirmations = ConfirmationManager::new(|sender: &ConsoleSender| sender.name().to_string());
        demo::register(&manager, &confirmations)?;
        manager.lock_registration();
        tracing::debug!(?coordinator, commands = manager.commands().len(), "session ready");
        Ok(Self {
            manager,
            confirmations,
            sender: Arc::new(sender),
        })
    }

    /// Execute one line, following any rerun a handler asked for.
    pub async fn run_line(&self, line: &str) -> Report {
        let mut report = Report::default();
        let mut next = Some(line.to_string());
        while let Some(input) = next.take() {
            let outcome = self.manager.execute(Arc::clone(&self.sender), &input).await;
            match outcome {
                CommandOutcome::Success(result) => {
                    report.stdout.extend(self.sender.drain());
                    next = result.context.get::<String>(demo::RERUN).cloned();
                }
                CommandOutcome::Cancelled => {
                    report.stdout.extend(self.sender.drain());
                    match self.confirmations.pending(&self.sender) {
                        Some(pending) => report
                            .stdout
                            .push(format!("`{pending}` requires confirmation, run `confirm` to proceed")),
                        None => report.stdout.push("cancelled".to_string()),
                    }
                }
                CommandOutcome::Failed(failure) => {
                    report.stdout.extend(self.sender.drain());
                    if !failure.handled {
                        report.stderr.push(format!("error: {}", failure.error));
                    }
                    report.failed = true;
                }
            }
        }
        report
    }

    pub fn suggest(&self, line: &str) -> Vec<String> {
        self.manager.suggest(Arc::clone(&self.sender), line)
    }

    pub fn render_tree(&self) -> String {
        self.manager.render_tree()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
