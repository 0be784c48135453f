// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution coordination
//!
//! An [`ExecutionJob`] is one invocation: preprocess, route, postprocess,
//! run the handler. A coordinator decides where the job runs and hands back
//! an [`ExecutionHandle`] that resolves to the [`CommandOutcome`] exactly
//! once.

use crate::pipeline::Pipeline;
use crate::processor::Step;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use sy_core::{Command, CommandContext, CommandError, CommandInput, CommandSender};
use tokio::runtime::Handle;
use tokio::sync::{oneshot, Mutex};
use tracing::Instrument;

/// A command that ran to completion.
pub struct CommandResult<S> {
    pub context: CommandContext<S>,
    pub command: Arc<Command<S>>,
}

/// A failed invocation after the exception controller saw it.
pub struct Failure<S> {
    pub error: CommandError<S>,
    /// Absent when the job died before resolving.
    pub context: Option<CommandContext<S>>,
    /// Whether a registered handler dealt with the failure.
    pub handled: bool,
}

pub enum CommandOutcome<S> {
    Success(CommandResult<S>),
    /// A pre- or postprocessor stopped the invocation.
    Cancelled,
    Failed(Failure<S>),
}

impl<S> CommandOutcome<S> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn error(&self) -> Option<&CommandError<S>> {
        match self {
            Self::Failed(failure) => Some(&failure.error),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&CommandContext<S>> {
        match self {
            Self::Success(result) => Some(&result.context),
            Self::Failed(failure) => failure.context.as_ref(),
            Self::Cancelled => None,
        }
    }
}

impl<S> fmt::Debug for CommandOutcome<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(result) => f
                .debug_tuple("Success")
                .field(&result.command.root_name())
                .finish(),
            Self::Cancelled => f.write_str("Cancelled"),
            Self::Failed(failure) => f
                .debug_struct("Failed")
                .field("error", &failure.error)
                .field("handled", &failure.handled)
                .finish(),
        }
    }
}

// ── Jobs ────────────────────────────────────────────────────────────────────

/// One pending invocation.
pub struct ExecutionJob<S> {
    pipeline: Arc<Pipeline<S>>,
    context: CommandContext<S>,
    input: CommandInput,
    lock: Option<Arc<Mutex<()>>>,
}

impl<S: CommandSender> ExecutionJob<S> {
    pub(crate) fn new(pipeline: Arc<Pipeline<S>>, context: CommandContext<S>, input: CommandInput) -> Self {
        Self {
            pipeline,
            context,
            input,
            lock: None,
        }
    }

    /// The raw input being executed.
    pub fn raw_input(&self) -> &str {
        self.context.raw_input()
    }

    /// Hold `lock` for the whole execution.
    pub fn with_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Run the invocation to completion on the current task.
    pub async fn run(self) -> CommandOutcome<S> {
        let span = tracing::info_span!(
            "command.execute",
            invocation = %self.context.id(),
            input_len = self.context.raw_input().len(),
        );
        self.execute().instrument(span).await
    }

    async fn execute(self) -> CommandOutcome<S> {
        let Self {
            pipeline,
            mut context,
            mut input,
            lock,
        } = self;
        let _guard = match &lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };
        let start = Instant::now();

        for preprocessor in pipeline.preprocessors() {
            match preprocessor.preprocess(&mut context, &mut input) {
                Step::Continue => {}
                Step::Cancel => {
                    tracing::debug!("cancelled by preprocessor");
                    return CommandOutcome::Cancelled;
                }
                Step::Fail(error) => return pipeline.fail(error, Some(context)),
            }
        }

        let routed = pipeline
            .tree
            .read()
            .parse(&mut context, &mut input, pipeline.settings.liberal_flag_parsing);
        let command = match routed {
            Ok(command) => command,
            Err(error) => return pipeline.fail(error, Some(context)),
        };

        for postprocessor in pipeline.postprocessors() {
            match postprocessor.postprocess(&mut context, &command) {
                Step::Continue => {}
                Step::Cancel => {
                    tracing::debug!(command = command.root_name(), "cancelled by postprocessor");
                    return CommandOutcome::Cancelled;
                }
                Step::Fail(error) => return pipeline.fail(error, Some(context)),
            }
        }

        let handler = Arc::clone(command.handler());
        match handler.execute(&mut context).await {
            Ok(()) => {
                tracing::info!(
                    command = command.root_name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "completed"
                );
                CommandOutcome::Success(CommandResult { context, command })
            }
            Err(source) => {
                tracing::warn!(
                    command = command.root_name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %source,
                    "handler failed"
                );
                let error = CommandError::CommandExecution {
                    sender: Arc::clone(context.sender_arc()),
                    chain: command.components().iter().map(|c| c.name().to_string()).collect(),
                    source,
                };
                pipeline.fail(error, Some(context))
            }
        }
    }
}

// ── Handles ─────────────────────────────────────────────────────────────────

type BoxedOutcome<S> = Pin<Box<dyn Future<Output = CommandOutcome<S>> + Send>>;

enum HandleState<S> {
    Inline(BoxedOutcome<S>),
    Spawned {
        receiver: oneshot::Receiver<CommandOutcome<S>>,
        pipeline: Arc<Pipeline<S>>,
    },
    Done,
}

/// Resolves to the outcome of a coordinated job.
#[must_use = "an execution handle does nothing unless awaited"]
pub struct ExecutionHandle<S> {
    state: HandleState<S>,
}

impl<S: CommandSender> ExecutionHandle<S> {
    /// Run `job` when the handle is awaited.
    pub fn inline(job: ExecutionJob<S>) -> Self {
        Self {
            state: HandleState::Inline(Box::pin(job.run())),
        }
    }

    /// Spawn `job` on `runtime` and resolve once it finishes.
    pub fn spawn(job: ExecutionJob<S>, runtime: &Handle) -> Self {
        let pipeline = Arc::clone(&job.pipeline);
        let (sender, receiver) = oneshot::channel();
        runtime.spawn(async move {
            // The receiver may have been dropped; nothing is waiting then.
            let _ = sender.send(job.run().await);
        });
        Self {
            state: HandleState::Spawned { receiver, pipeline },
        }
    }
}

impl<S: CommandSender> Future for ExecutionHandle<S> {
    type Output = CommandOutcome<S>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outcome = match &mut this.state {
            HandleState::Inline(future) => match future.as_mut().poll(cx) {
                Poll::Ready(outcome) => outcome,
                Poll::Pending => return Poll::Pending,
            },
            HandleState::Spawned { receiver, pipeline } => match Pin::new(receiver).poll(cx) {
                Poll::Ready(Ok(outcome)) => outcome,
                Poll::Ready(Err(_)) => {
                    let error = CommandError::Aborted {
                        reason: "execution task ended without a result".to_string(),
                    };
                    pipeline.fail(error, None)
                }
                Poll::Pending => return Poll::Pending,
            },
            HandleState::Done => CommandOutcome::Failed(Failure {
                error: CommandError::Aborted {
                    reason: "outcome already taken".to_string(),
                },
                context: None,
                handled: false,
            }),
        };
        this.state = HandleState::Done;
        Poll::Ready(outcome)
    }
}

// ── Coordinators ────────────────────────────────────────────────────────────

/// Decides where execution jobs run.
pub trait ExecutionCoordinator<S>: Send + Sync + 'static {
    fn coordinate(&self, job: ExecutionJob<S>) -> ExecutionHandle<S>;
}

/// Runs each job on the awaiting task.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCoordinator;

impl<S: CommandSender> ExecutionCoordinator<S> for SimpleCoordinator {
    fn coordinate(&self, job: ExecutionJob<S>) -> ExecutionHandle<S> {
        ExecutionHandle::inline(job)
    }
}

/// Spawns each job as a tokio task.
///
/// Uses the given runtime, or the ambient one. Without either the job runs
/// inline.
#[derive(Debug, Clone, Default)]
pub struct AsyncCoordinator {
    runtime: Option<Handle>,
}

impl AsyncCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime(runtime: Handle) -> Self {
        Self {
            runtime: Some(runtime),
        }
    }
}

impl<S: CommandSender> ExecutionCoordinator<S> for AsyncCoordinator {
    fn coordinate(&self, job: ExecutionJob<S>) -> ExecutionHandle<S> {
        match self.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => ExecutionHandle::spawn(job, &runtime),
            None => {
                tracing::debug!("no tokio runtime, executing inline");
                ExecutionHandle::inline(job)
            }
        }
    }
}

/// Serializes jobs behind a shared lock, delegating placement to `inner`.
#[derive(Debug, Clone, Default)]
pub struct LockingCoordinator<C> {
    inner: C,
    lock: Arc<Mutex<()>>,
}

impl<C> LockingCoordinator<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The lock held during execution. Hosts take it to mutate state that
    /// handlers read, such as the command set.
    pub fn lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.lock)
    }
}

impl<S: CommandSender, C: ExecutionCoordinator<S>> ExecutionCoordinator<S> for LockingCoordinator<C> {
    fn coordinate(&self, job: ExecutionJob<S>) -> ExecutionHandle<S> {
        self.inner.coordinate(job.with_lock(self.lock()))
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
