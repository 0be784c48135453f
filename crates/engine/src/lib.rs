// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Switchyard dispatch engine
//!
//! Registers commands into a routing tree and executes, completes and
//! documents input against it.

pub mod coordinator;
mod error;
pub mod exception;
mod help;
mod manager;
mod pipeline;
pub mod processor;
mod settings;
pub mod suggestion;
pub mod syntax;
mod tree;

#[cfg(test)]
mod test_helpers;

pub use coordinator::{
    AsyncCoordinator, CommandOutcome, CommandResult, ExecutionCoordinator, ExecutionHandle,
    ExecutionJob, Failure, LockingCoordinator, SimpleCoordinator,
};
pub use error::RegistrationError;
pub use exception::{Disposition, ExceptionContext, ExceptionController, HandlerResult};
pub use help::{ComponentHelp, HelpEntry, HelpIndex, HelpQueryResult};
pub use manager::{CommandManager, RegistrationState};
pub use processor::{
    CommandPostprocessor, CommandPreprocessor, ConfirmationManager, Step, REQUIRES_CONFIRMATION,
};
pub use settings::{ManagerSettings, DEFAULT_MAX_EXCEPTION_DEPTH};
pub use suggestion::{FilteringSuggestionProcessor, SortingSuggestionProcessor, SuggestionProcessor};
pub use tree::CommandTree;
