// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for command registration

use thiserror::Error;

/// Errors that can occur while registering or deleting commands.
///
/// These are returned to the caller directly and never routed through the
/// exception controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("ambiguous node {node} under {parent}; siblings: {}", .siblings.join(", "))]
    AmbiguousNode {
        parent: String,
        node: String,
        siblings: Vec<String>,
    },
    #[error("command already registered: {0}")]
    DuplicateCommand(String),
    #[error("registration is locked")]
    RegistrationLocked,
    #[error("root command deletion is disabled")]
    DeletionDisabled,
    #[error("unknown root command: {0}")]
    UnknownRootCommand(String),
    #[error("root component must be a literal: {0}")]
    NonLiteralRoot(String),
}
