// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ArgumentParser, CommandContext, CommandInput, CommandSender, ParserError};
use std::collections::HashSet;
use std::sync::Arc;

/// A sender with an explicit permission set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSender {
    pub name: String,
    permissions: HashSet<String>,
    all: bool,
    console: bool,
}

impl TestSender {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// A console sender holding every permission.
    pub fn console() -> Self {
        Self {
            name: "console".to_string(),
            all: true,
            console: true,
            ..Self::default()
        }
    }

    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.insert(permission.to_string());
        self
    }

    pub fn is_console(&self) -> bool {
        self.console
    }
}

impl CommandSender for TestSender {
    fn has_permission(&self, permission: &str) -> bool {
        self.all || self.permissions.contains(permission)
    }
}

// ── Parsers ─────────────────────────────────────────────────────────────────

/// Reads one token as a `String`, suggesting from a fixed word list.
#[derive(Debug, Clone, Default)]
pub struct WordParser {
    pub words: Vec<String>,
}

impl WordParser {
    pub fn with_words(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl<S> ArgumentParser<S> for WordParser {
    type Value = String;

    fn parse(
        &self,
        _context: &CommandContext<S>,
        input: &mut CommandInput,
    ) -> Result<String, ParserError> {
        if input.is_empty() {
            return Err("expected a word".into());
        }
        Ok(input.read_string())
    }

    fn suggestions(&self, _context: &CommandContext<S>, input: &str) -> Vec<String> {
        self.words
            .iter()
            .filter(|w| w.starts_with(input))
            .cloned()
            .collect()
    }
}

/// Reads one token as an `i64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberParser;

impl<S> ArgumentParser<S> for NumberParser {
    type Value = i64;

    fn parse(
        &self,
        _context: &CommandContext<S>,
        input: &mut CommandInput,
    ) -> Result<i64, ParserError> {
        let value = input.peek_string().parse::<i64>()?;
        input.read_string();
        Ok(value)
    }
}

// ── Context factory functions ───────────────────────────────────────────────

pub fn context_for(sender: TestSender, input: &str) -> CommandContext<TestSender> {
    CommandContext::new(Arc::new(sender), input)
}

pub fn test_context() -> CommandContext<TestSender> {
    context_for(TestSender::new("tester"), "")
}
