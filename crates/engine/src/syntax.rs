// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Usage strings for commands and components.
//!
//! Literals print as their name, required arguments as `<name>`, optional
//! arguments as `[name]` and flags as `[--name]` or `[--name <value>]`.

use sy_core::{Command, CommandComponent};

/// Usage form of a single component.
pub fn component_syntax<S>(component: &CommandComponent<S>) -> String {
    if component.is_literal() {
        component.name().to_string()
    } else if component.is_required() {
        format!("<{}>", component.name())
    } else {
        format!("[{}]", component.name())
    }
}

/// Full usage string of a command, flags last.
pub fn command_syntax<S>(command: &Command<S>) -> String {
    command
        .components()
        .iter()
        .map(component_syntax)
        .chain(command.flags().iter().map(|flag| flag.syntax()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "syntax_tests.rs"]
mod tests;
