// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boolean parser.

use sy_core::{ArgumentParser, CommandContext, CommandInput, ParserError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BooleanParseError {
    #[error("expected a boolean")]
    Missing,
    #[error("not a boolean: {0}")]
    Invalid(String),
}

const STRICT_TRUE: &[&str] = &["true"];
const STRICT_FALSE: &[&str] = &["false"];
const LIBERAL_TRUE: &[&str] = &["true", "yes", "on"];
const LIBERAL_FALSE: &[&str] = &["false", "no", "off"];

/// Parses `true`/`false`, or in liberal mode also `yes`/`no`/`on`/`off`.
/// Matching ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BooleanParser {
    liberal: bool,
}

impl BooleanParser {
    pub fn strict() -> Self {
        Self { liberal: false }
    }

    pub fn liberal() -> Self {
        Self { liberal: true }
    }

    fn words(&self) -> (&'static [&'static str], &'static [&'static str]) {
        if self.liberal {
            (LIBERAL_TRUE, LIBERAL_FALSE)
        } else {
            (STRICT_TRUE, STRICT_FALSE)
        }
    }
}

impl<S> ArgumentParser<S> for BooleanParser {
    type Value = bool;

    fn parse(&self, _context: &CommandContext<S>, input: &mut CommandInput) -> Result<bool, ParserError> {
        let token = input.peek_string();
        if token.is_empty() {
            return Err(BooleanParseError::Missing.into());
        }
        let (truthy, falsy) = self.words();
        let value = if truthy.iter().any(|w| w.eq_ignore_ascii_case(token)) {
            true
        } else if falsy.iter().any(|w| w.eq_ignore_ascii_case(token)) {
            false
        } else {
            return Err(BooleanParseError::Invalid(token.to_string()).into());
        };
        input.read_string();
        Ok(value)
    }

    fn suggestions(&self, _context: &CommandContext<S>, input: &str) -> Vec<String> {
        let (truthy, falsy) = self.words();
        let prefix = input.to_ascii_lowercase();
        truthy
            .iter()
            .chain(falsy)
            .filter(|w| w.starts_with(&prefix))
            .map(|w| w.to_string())
            .collect()
    }

    fn config_key(&self) -> String {
        format!("boolean<liberal={}>", self.liberal)
    }
}

#[cfg(test)]
#[path = "boolean_tests.rs"]
mod tests;
