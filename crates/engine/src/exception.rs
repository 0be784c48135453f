// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exception controller
//!
//! Failures are dispatched to handlers registered per [`ErrorKind`]. The
//! most specific kind is tried first, then each parent in turn up to
//! [`ErrorKind::Any`]. Within a kind the most recently registered handler
//! runs first. A handler may handle the failure, pass it on, or translate it
//! into another error which is dispatched again from the top.

use crate::settings::DEFAULT_MAX_EXCEPTION_DEPTH;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use sy_core::{CommandContext, CommandError, ErrorKind};

/// What a handler did with a failure.
pub enum HandlerResult<S> {
    Handled,
    /// Pass the failure to the next handler.
    Rethrow,
    /// Replace the failure and dispatch the replacement.
    Translate(CommandError<S>),
}

/// The failure as seen by a handler.
pub struct ExceptionContext<'a, S> {
    pub error: &'a CommandError<S>,
    /// Absent when the failure happened outside a parse, such as a job that
    /// died before resolving.
    pub context: Option<&'a CommandContext<S>>,
    /// Number of translations so far.
    pub depth: usize,
}

/// Final state of a dispatched failure.
#[derive(Debug)]
pub enum Disposition<S> {
    Handled(CommandError<S>),
    Unhandled(CommandError<S>),
}

impl<S> Disposition<S> {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    pub fn into_error(self) -> CommandError<S> {
        match self {
            Self::Handled(error) | Self::Unhandled(error) => error,
        }
    }
}

type HandlerFn<S> = Arc<dyn Fn(&ExceptionContext<'_, S>) -> HandlerResult<S> + Send + Sync>;
type FilterFn<S> = Arc<dyn Fn(&CommandError<S>) -> bool + Send + Sync>;

struct Registration<S> {
    filter: Option<FilterFn<S>>,
    handler: HandlerFn<S>,
}

impl<S> Clone for Registration<S> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Registry of failure handlers.
pub struct ExceptionController<S> {
    handlers: RwLock<HashMap<ErrorKind, Vec<Registration<S>>>>,
    max_depth: usize,
}

impl<S: Send + Sync + 'static> Default for ExceptionController<S> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXCEPTION_DEPTH)
    }
}

impl<S: Send + Sync + 'static> ExceptionController<S> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            max_depth,
        }
    }

    /// Handle failures of `kind` and every kind below it.
    pub fn register_handler<F>(&self, kind: ErrorKind, handler: F)
    where
        F: Fn(&ExceptionContext<'_, S>) -> HandlerResult<S> + Send + Sync + 'static,
    {
        self.register(
            kind,
            Registration {
                filter: None,
                handler: Arc::new(handler),
            },
        );
    }

    /// Like [`Self::register_handler`], but only for failures accepted by
    /// `filter`. Rejected failures continue to the next handler.
    pub fn register_filtered_handler<P, F>(&self, kind: ErrorKind, filter: P, handler: F)
    where
        P: Fn(&CommandError<S>) -> bool + Send + Sync + 'static,
        F: Fn(&ExceptionContext<'_, S>) -> HandlerResult<S> + Send + Sync + 'static,
    {
        self.register(
            kind,
            Registration {
                filter: Some(Arc::new(filter)),
                handler: Arc::new(handler),
            },
        );
    }

    fn register(&self, kind: ErrorKind, registration: Registration<S>) {
        self.handlers
            .write()
            .entry(kind)
            .or_default()
            .insert(0, registration);
    }

    /// Number of handlers registered directly on `kind`.
    pub fn handler_count(&self, kind: ErrorKind) -> usize {
        self.handlers.read().get(&kind).map_or(0, Vec::len)
    }

    /// Dispatch `error` to the registered handlers.
    ///
    /// Nested dispatch failures are unwrapped first. Translation stops once
    /// the configured depth is exceeded and the latest error is returned
    /// unhandled.
    pub fn handle(
        &self,
        error: CommandError<S>,
        context: Option<&CommandContext<S>>,
    ) -> Disposition<S> {
        let mut error = error.unwrap_nested();
        let mut depth = 0;

        'dispatch: loop {
            for kind in error.kind().lineage() {
                // Snapshot so handlers may register further handlers.
                let registrations = self.handlers.read().get(&kind).cloned().unwrap_or_default();
                for registration in registrations {
                    if let Some(filter) = &registration.filter {
                        if !filter(&error) {
                            continue;
                        }
                    }
                    let exception = ExceptionContext {
                        error: &error,
                        context,
                        depth,
                    };
                    match (registration.handler)(&exception) {
                        HandlerResult::Handled => {
                            tracing::debug!(kind = %error.kind(), handler_kind = %kind, "failure handled");
                            return Disposition::Handled(error);
                        }
                        HandlerResult::Rethrow => {}
                        HandlerResult::Translate(next) => {
                            depth += 1;
                            if depth > self.max_depth {
                                tracing::warn!(
                                    depth,
                                    kind = %next.kind(),
                                    "exception translation depth exceeded"
                                );
                                return Disposition::Unhandled(next);
                            }
                            tracing::debug!(from = %error.kind(), to = %next.kind(), depth, "failure translated");
                            error = next.unwrap_nested();
                            continue 'dispatch;
                        }
                    }
                }
            }
            return Disposition::Unhandled(error);
        }
    }
}

#[cfg(test)]
#[path = "exception_tests.rs"]
mod tests;
