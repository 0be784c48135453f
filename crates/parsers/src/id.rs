// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! UUID parser.

use sy_core::{ArgumentParser, CommandContext, CommandInput, ParserError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UuidParseError {
    #[error("expected a uuid")]
    Missing,
    #[error("not a uuid: {0}")]
    Invalid(String),
}

/// Parses one token as a hyphenated or simple UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UuidParser;

impl<S> ArgumentParser<S> for UuidParser {
    type Value = Uuid;

    fn parse(&self, _context: &CommandContext<S>, input: &mut CommandInput) -> Result<Uuid, ParserError> {
        let token = input.peek_string();
        if token.is_empty() {
            return Err(UuidParseError::Missing.into());
        }
        let value = Uuid::parse_str(token).map_err(|_| UuidParseError::Invalid(token.to_string()))?;
        input.read_string();
        Ok(value)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
