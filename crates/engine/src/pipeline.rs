// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared state behind a manager and its execution jobs.

use crate::coordinator::{CommandOutcome, Failure};
use crate::exception::ExceptionController;
use crate::processor::{CommandPostprocessor, CommandPreprocessor};
use crate::settings::ManagerSettings;
use crate::tree::CommandTree;
use parking_lot::RwLock;
use std::sync::Arc;
use sy_core::{CommandContext, CommandError, CommandSender, ErrorKind};

pub(crate) struct Pipeline<S> {
    pub(crate) settings: ManagerSettings,
    pub(crate) tree: RwLock<CommandTree<S>>,
    pub(crate) preprocessors: RwLock<Vec<Arc<dyn CommandPreprocessor<S>>>>,
    pub(crate) postprocessors: RwLock<Vec<Arc<dyn CommandPostprocessor<S>>>>,
    pub(crate) exceptions: ExceptionController<S>,
}

impl<S: CommandSender> Pipeline<S> {
    pub(crate) fn new(settings: ManagerSettings) -> Self {
        Self {
            exceptions: ExceptionController::new(settings.max_exception_depth),
            settings,
            tree: RwLock::new(CommandTree::new()),
            preprocessors: RwLock::new(Vec::new()),
            postprocessors: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn preprocessors(&self) -> Vec<Arc<dyn CommandPreprocessor<S>>> {
        self.preprocessors.read().clone()
    }

    pub(crate) fn postprocessors(&self) -> Vec<Arc<dyn CommandPostprocessor<S>>> {
        self.postprocessors.read().clone()
    }

    /// Route a failure through the exception controller.
    pub(crate) fn fail(
        &self,
        error: CommandError<S>,
        context: Option<CommandContext<S>>,
    ) -> CommandOutcome<S> {
        let disposition = self.exceptions.handle(error, context.as_ref());
        let handled = disposition.is_handled();
        let error = disposition.into_error();
        if !handled {
            if error.kind().is_a(ErrorKind::IllegalState) {
                tracing::error!(kind = %error.kind(), error = %error, "unhandled command failure");
            } else {
                tracing::debug!(kind = %error.kind(), error = %error, "unhandled command failure");
            }
        }
        CommandOutcome::Failed(Failure {
            error,
            context,
            handled,
        })
    }
}
