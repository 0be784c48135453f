// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sy-core: command model for the Switchyard dispatch engine
//!
//! Everything a host needs to describe commands (components, flags,
//! permissions, parsers, handlers) and the per-invocation context and error
//! types the engine hands back.

pub mod command;
pub mod component;
pub mod context;
pub mod error;
pub mod flag;
pub mod input;
pub mod parser;
pub mod permission;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use command::{
    Command, CommandBuilder, CommandHandler, CommandMeta, FnHandler, HandlerError, NoOpHandler,
};
pub use component::{
    ArgumentBuilder, ArgumentSpec, CommandComponent, ComponentKind, DefaultValue,
    SuggestionProvider,
};
pub use context::{ArgumentTiming, BoxedValue, CommandContext, ContextKey, FlagContext};
pub use error::{BuildError, CommandError, ErrorKind};
pub use flag::{CommandFlag, FlagKind, FlagParseError};
pub use input::{is_flag_token, CommandInput};
pub use parser::{erase, ArgumentParser, ErasedParser, ParserError, ValueType};
pub use permission::{CommandSender, Permission, PredicatePermission, SenderType};
