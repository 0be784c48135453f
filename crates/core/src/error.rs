// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy
//!
//! [`CommandError`] is what execution reports and what exception handlers
//! receive. Every variant maps to an [`ErrorKind`]; kinds form a small
//! hierarchy so handlers can be registered for a whole family of failures.

use crate::command::HandlerError;
use crate::parser::ParserError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Classification of a [`CommandError`], arranged in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Root of every kind.
    Any,
    /// Bad input from the sender.
    InvalidArgument,
    /// Input could not be routed or parsed.
    CommandParse,
    /// Engine or registration defect.
    IllegalState,
    NoSuchCommand,
    InvalidSyntax,
    NoPermission,
    InvalidCommandSender,
    ArgumentParse,
    CommandExecution,
    NoCommandInLeaf,
    Aborted,
}

impl ErrorKind {
    /// The next more general kind, `None` for [`ErrorKind::Any`].
    pub fn parent(self) -> Option<ErrorKind> {
        use ErrorKind::*;
        match self {
            Any => None,
            InvalidArgument | CommandExecution | IllegalState => Some(Any),
            CommandParse => Some(InvalidArgument),
            NoSuchCommand | InvalidSyntax | NoPermission | InvalidCommandSender
            | ArgumentParse => Some(CommandParse),
            NoCommandInLeaf | Aborted => Some(IllegalState),
        }
    }

    /// This kind followed by its ancestors, most specific first.
    pub fn lineage(self) -> impl Iterator<Item = ErrorKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    /// Whether this kind is `ancestor` or descends from it.
    pub fn is_a(self, ancestor: ErrorKind) -> bool {
        self.lineage().any(|kind| kind == ancestor)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A failed command invocation.
///
/// Routing variants carry the sender and the chain of component names
/// consumed before the failure.
#[derive(Error)]
pub enum CommandError<S> {
    #[error("unknown command: {input}")]
    NoSuchCommand {
        sender: Arc<S>,
        input: String,
        chain: Vec<String>,
    },
    #[error("invalid syntax, expected: {syntax}")]
    InvalidSyntax {
        sender: Arc<S>,
        syntax: String,
        chain: Vec<String>,
    },
    #[error("missing permission: {permission}")]
    NoPermission {
        sender: Arc<S>,
        permission: String,
        chain: Vec<String>,
    },
    #[error("command requires sender type: {required}")]
    InvalidCommandSender {
        sender: Arc<S>,
        required: String,
        chain: Vec<String>,
    },
    #[error("invalid value for {component}: {source}")]
    ArgumentParse {
        sender: Arc<S>,
        component: String,
        chain: Vec<String>,
        #[source]
        source: ParserError,
    },
    #[error("command failed: {source}")]
    CommandExecution {
        sender: Arc<S>,
        chain: Vec<String>,
        #[source]
        source: HandlerError,
    },
    #[error("no command registered at `{}`", .chain.join(" "))]
    NoCommandInLeaf { sender: Arc<S>, chain: Vec<String> },
    #[error("command aborted: {reason}")]
    Aborted { reason: String },
}

impl<S> CommandError<S> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchCommand { .. } => ErrorKind::NoSuchCommand,
            Self::InvalidSyntax { .. } => ErrorKind::InvalidSyntax,
            Self::NoPermission { .. } => ErrorKind::NoPermission,
            Self::InvalidCommandSender { .. } => ErrorKind::InvalidCommandSender,
            Self::ArgumentParse { .. } => ErrorKind::ArgumentParse,
            Self::CommandExecution { .. } => ErrorKind::CommandExecution,
            Self::NoCommandInLeaf { .. } => ErrorKind::NoCommandInLeaf,
            Self::Aborted { .. } => ErrorKind::Aborted,
        }
    }

    /// The sender, for every variant except [`CommandError::Aborted`].
    pub fn sender(&self) -> Option<&Arc<S>> {
        match self {
            Self::NoSuchCommand { sender, .. }
            | Self::InvalidSyntax { sender, .. }
            | Self::NoPermission { sender, .. }
            | Self::InvalidCommandSender { sender, .. }
            | Self::ArgumentParse { sender, .. }
            | Self::CommandExecution { sender, .. }
            | Self::NoCommandInLeaf { sender, .. } => Some(sender),
            Self::Aborted { .. } => None,
        }
    }

    /// Component names consumed before the failure.
    pub fn chain(&self) -> &[String] {
        match self {
            Self::NoSuchCommand { chain, .. }
            | Self::InvalidSyntax { chain, .. }
            | Self::NoPermission { chain, .. }
            | Self::InvalidCommandSender { chain, .. }
            | Self::ArgumentParse { chain, .. }
            | Self::CommandExecution { chain, .. }
            | Self::NoCommandInLeaf { chain, .. } => chain,
            Self::Aborted { .. } => &[],
        }
    }
}

impl<S: Send + Sync + 'static> CommandError<S> {
    /// Strip execution wrappers around a nested dispatch failure.
    ///
    /// A handler that dispatches another command and returns its
    /// `CommandError` is reported as that inner error.
    pub fn unwrap_nested(self) -> Self {
        let mut current = self;
        loop {
            match current {
                Self::CommandExecution {
                    sender,
                    chain,
                    source,
                } => match source.downcast::<CommandError<S>>() {
                    Ok(inner) => current = *inner,
                    Err(source) => {
                        return Self::CommandExecution {
                            sender,
                            chain,
                            source,
                        }
                    }
                },
                other => return other,
            }
        }
    }
}

impl<S> fmt::Debug for CommandError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandError")
            .field("kind", &self.kind())
            .field("chain", &self.chain())
            .field("message", &self.to_string())
            .finish()
    }
}

/// Errors that can occur while building a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("required component `{0}` follows an optional one")]
    RequiredAfterOptional(String),
    #[error("duplicate component name: {0}")]
    DuplicateComponent(String),
    #[error("duplicate flag: {0}")]
    DuplicateFlag(String),
    #[error("component and flag names must not be empty")]
    EmptyName,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
