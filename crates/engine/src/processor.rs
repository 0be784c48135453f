// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pre- and postprocessing hooks
//!
//! Preprocessors run before routing and may rewrite the input. Postprocessors
//! run after a command was routed and before its handler. Either may cancel
//! the invocation or fail it with an error.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use sy_core::{Command, CommandContext, CommandError, CommandInput, CommandSender};

/// Whether execution proceeds past a hook.
pub enum Step<S> {
    Continue,
    Cancel,
    Fail(CommandError<S>),
}

pub trait CommandPreprocessor<S>: Send + Sync + 'static {
    fn preprocess(&self, context: &mut CommandContext<S>, input: &mut CommandInput) -> Step<S>;
}

impl<S, F> CommandPreprocessor<S> for F
where
    F: Fn(&mut CommandContext<S>, &mut CommandInput) -> Step<S> + Send + Sync + 'static,
{
    fn preprocess(&self, context: &mut CommandContext<S>, input: &mut CommandInput) -> Step<S> {
        self(context, input)
    }
}

pub trait CommandPostprocessor<S>: Send + Sync + 'static {
    fn postprocess(&self, context: &mut CommandContext<S>, command: &Arc<Command<S>>) -> Step<S>;
}

impl<S, F> CommandPostprocessor<S> for F
where
    F: Fn(&mut CommandContext<S>, &Arc<Command<S>>) -> Step<S> + Send + Sync + 'static,
{
    fn postprocess(&self, context: &mut CommandContext<S>, command: &Arc<Command<S>>) -> Step<S> {
        self(context, command)
    }
}

// ── Confirmation ────────────────────────────────────────────────────────────

/// Meta key marking a command that must be confirmed before it runs.
pub const REQUIRES_CONFIRMATION: &str = "requires-confirmation";

type KeyFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

#[derive(Default)]
struct Confirmations {
    /// Input awaiting confirmation, per sender key.
    pending: HashMap<String, String>,
    /// Input confirmed and allowed to run once, per sender key.
    approved: HashMap<String, String>,
}

/// Holds back commands whose meta sets [`REQUIRES_CONFIRMATION`].
///
/// Register [`ConfirmationManager::postprocessor`] with the manager. The
/// first invocation is cancelled and remembered per sender; after
/// [`ConfirmationManager::confirm`] the same input runs once.
pub struct ConfirmationManager<S> {
    state: Arc<Mutex<Confirmations>>,
    key: KeyFn<S>,
}

impl<S> Clone for ConfirmationManager<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            key: Arc::clone(&self.key),
        }
    }
}

impl<S: CommandSender> ConfirmationManager<S> {
    /// `key` identifies a sender across invocations.
    pub fn new<K>(key: K) -> Self
    where
        K: Fn(&S) -> String + Send + Sync + 'static,
    {
        Self {
            state: Arc::new(Mutex::new(Confirmations::default())),
            key: Arc::new(key),
        }
    }

    /// Input waiting for confirmation by `sender`, if any.
    pub fn pending(&self, sender: &S) -> Option<String> {
        self.state.lock().pending.get(&(self.key)(sender)).cloned()
    }

    /// Approve the pending input of `sender` and return it for re-execution.
    pub fn confirm(&self, sender: &S) -> Option<String> {
        let key = (self.key)(sender);
        let mut state = self.state.lock();
        let input = state.pending.remove(&key)?;
        state.approved.insert(key, input.clone());
        Some(input)
    }

    pub fn postprocessor(&self) -> impl CommandPostprocessor<S> {
        let manager = self.clone();
        move |context: &mut CommandContext<S>, command: &Arc<Command<S>>| manager.check(context, command)
    }

    fn check(&self, context: &mut CommandContext<S>, command: &Arc<Command<S>>) -> Step<S> {
        if !command.meta().flag(REQUIRES_CONFIRMATION) {
            return Step::Continue;
        }
        let key = (self.key)(context.sender());
        let input = context.raw_input().trim().to_string();
        let mut state = self.state.lock();
        if state.approved.get(&key) == Some(&input) {
            state.approved.remove(&key);
            return Step::Continue;
        }
        tracing::debug!(sender = %key, input = %input, "awaiting confirmation");
        state.pending.insert(key, input);
        Step::Cancel
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
