// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command manager
//!
//! Entry point for hosts: owns the command tree, the processing hooks, the
//! exception controller and the coordinator that runs invocations.

use crate::coordinator::{ExecutionCoordinator, ExecutionHandle, ExecutionJob};
use crate::error::RegistrationError;
use crate::exception::ExceptionController;
use crate::help::HelpIndex;
use crate::pipeline::Pipeline;
use crate::processor::{CommandPostprocessor, CommandPreprocessor, Step};
use crate::settings::ManagerSettings;
use crate::suggestion::{FilteringSuggestionProcessor, SuggestionProcessor};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use sy_core::{Command, CommandBuilder, CommandContext, CommandInput, CommandSender};

/// Lifecycle of command registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    BeforeRegistration,
    Registering,
    /// Registration is closed unless unsafe registration is allowed.
    AfterRegistration,
}

pub struct CommandManager<S> {
    pipeline: Arc<Pipeline<S>>,
    coordinator: Box<dyn ExecutionCoordinator<S>>,
    state: Mutex<RegistrationState>,
    suggestions: RwLock<Arc<dyn SuggestionProcessor<S>>>,
}

impl<S: CommandSender> CommandManager<S> {
    pub fn new(coordinator: impl ExecutionCoordinator<S>) -> Self {
        Self::with_settings(coordinator, ManagerSettings::default())
    }

    pub fn with_settings(coordinator: impl ExecutionCoordinator<S>, settings: ManagerSettings) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::new(settings)),
            coordinator: Box::new(coordinator),
            state: Mutex::new(RegistrationState::BeforeRegistration),
            suggestions: RwLock::new(Arc::new(FilteringSuggestionProcessor::default())),
        }
    }

    pub fn settings(&self) -> &ManagerSettings {
        &self.pipeline.settings
    }

    /// Start building a command rooted at `name`.
    pub fn builder(&self, name: impl Into<String>) -> CommandBuilder<S> {
        Command::builder(name)
    }

    /// Register a command.
    ///
    /// Fails when registration is locked, when the command would make the
    /// tree ambiguous, or when its path is taken and overriding is off. The
    /// tree is unchanged on failure.
    pub fn command(&self, command: Command<S>) -> Result<Arc<Command<S>>, RegistrationError> {
        let mut state = self.state.lock();
        if *state == RegistrationState::AfterRegistration && !self.settings().allow_unsafe_registration
        {
            return Err(RegistrationError::RegistrationLocked);
        }
        let replace = self.settings().override_existing_commands;
        let registered = self.pipeline.tree.write().insert(command, replace)?;
        if *state == RegistrationState::BeforeRegistration {
            *state = RegistrationState::Registering;
        }
        Ok(registered)
    }

    /// Remove a root literal and every command below it.
    pub fn delete_root_command(&self, name: &str) -> Result<(), RegistrationError> {
        if !self.settings().root_command_deletion {
            return Err(RegistrationError::DeletionDisabled);
        }
        self.pipeline.tree.write().delete_root(name)?;
        Ok(())
    }

    pub fn registration_state(&self) -> RegistrationState {
        *self.state.lock()
    }

    /// Close registration.
    pub fn lock_registration(&self) {
        *self.state.lock() = RegistrationState::AfterRegistration;
        tracing::debug!("registration locked");
    }

    pub fn register_preprocessor(&self, preprocessor: impl CommandPreprocessor<S>) {
        self.pipeline.preprocessors.write().push(Arc::new(preprocessor));
    }

    pub fn register_postprocessor(&self, postprocessor: impl CommandPostprocessor<S>) {
        self.pipeline.postprocessors.write().push(Arc::new(postprocessor));
    }

    pub fn exception_controller(&self) -> &ExceptionController<S> {
        &self.pipeline.exceptions
    }

    /// Replace the final pass over suggestions.
    pub fn set_suggestion_processor(&self, processor: impl SuggestionProcessor<S>) {
        *self.suggestions.write() = Arc::new(processor);
    }

    /// Execute `input` on behalf of `sender`.
    ///
    /// The returned handle resolves once; failures arrive as
    /// [`crate::CommandOutcome::Failed`] after the exception controller has
    /// seen them.
    pub fn execute(&self, sender: impl Into<Arc<S>>, input: &str) -> ExecutionHandle<S> {
        let context = CommandContext::new(sender.into(), input);
        let job = ExecutionJob::new(Arc::clone(&self.pipeline), context, CommandInput::new(input));
        self.coordinator.coordinate(job)
    }

    /// Completion candidates for the last token of `input`.
    pub fn suggest(&self, sender: impl Into<Arc<S>>, input: &str) -> Vec<String> {
        let mut context = CommandContext::for_suggestions(sender.into(), input);
        let mut cursor = CommandInput::new(input);
        for preprocessor in self.pipeline.preprocessors() {
            if !matches!(preprocessor.preprocess(&mut context, &mut cursor), Step::Continue) {
                return Vec::new();
            }
        }
        let (partial, raw) = self.pipeline.tree.read().suggest(&mut context, &mut cursor);
        let processor = Arc::clone(&*self.suggestions.read());
        processor.process(&context, &partial, raw)
    }

    /// Every registered command in registration order.
    pub fn commands(&self) -> Vec<Arc<Command<S>>> {
        self.pipeline.tree.read().commands().to_vec()
    }

    pub fn root_commands(&self) -> Vec<String> {
        self.pipeline
            .tree
            .read()
            .root_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn help_index(&self) -> HelpIndex<S> {
        HelpIndex::new(self.commands())
    }

    /// Indented listing of the command tree.
    pub fn render_tree(&self) -> String {
        self.pipeline.tree.read().render()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
