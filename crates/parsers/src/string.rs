// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String parser.

use sy_core::{is_flag_token, ArgumentParser, CommandContext, CommandInput, ParserError};
use thiserror::Error;

/// Errors from string parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StringParseError {
    #[error("expected a string")]
    Missing,
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// How much input a [`StringParser`] consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringMode {
    /// One whitespace-delimited token.
    #[default]
    Single,
    /// Everything that remains.
    Greedy,
    /// Everything up to the first flag token.
    GreedyFlagYielding,
    /// A `"double"` or `'single'` quoted string, or one token when unquoted.
    Quoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringParser {
    mode: StringMode,
}

impl StringParser {
    pub fn new(mode: StringMode) -> Self {
        Self { mode }
    }

    pub fn single() -> Self {
        Self::new(StringMode::Single)
    }

    pub fn greedy() -> Self {
        Self::new(StringMode::Greedy)
    }

    pub fn greedy_flag_yielding() -> Self {
        Self::new(StringMode::GreedyFlagYielding)
    }

    pub fn quoted() -> Self {
        Self::new(StringMode::Quoted)
    }

    pub fn mode(&self) -> StringMode {
        self.mode
    }
}

fn read_quoted(input: &mut CommandInput) -> Result<String, StringParseError> {
    let start = input.cursor();
    let Some(quote) = input.read_char() else {
        return Err(StringParseError::Missing);
    };
    let mut value = String::new();
    loop {
        match input.read_char() {
            None => {
                input.rewind(start);
                return Err(StringParseError::UnterminatedQuote);
            }
            Some('\\') => match input.read_char() {
                Some(escaped) => value.push(escaped),
                None => {
                    input.rewind(start);
                    return Err(StringParseError::UnterminatedQuote);
                }
            },
            Some(c) if c == quote => break,
            Some(c) => value.push(c),
        }
    }
    input.skip_whitespace();
    Ok(value)
}

impl<S> ArgumentParser<S> for StringParser {
    type Value = String;

    fn parse(&self, _context: &CommandContext<S>, input: &mut CommandInput) -> Result<String, ParserError> {
        input.skip_whitespace();
        if input.is_empty() {
            return Err(StringParseError::Missing.into());
        }
        let value = match self.mode {
            StringMode::Single => input.read_string(),
            StringMode::Greedy => input.read_remaining(),
            StringMode::GreedyFlagYielding => {
                let start = input.cursor();
                while !input.is_empty() && !is_flag_token(input.peek_string()) {
                    input.read_string();
                }
                let value = input.read_since(start).trim_end().to_string();
                if value.is_empty() {
                    return Err(StringParseError::Missing.into());
                }
                value
            }
            StringMode::Quoted => match input.peek_char() {
                Some('"' | '\'') => read_quoted(input)?,
                _ => input.read_string(),
            },
        };
        Ok(value)
    }

    fn requested_tokens(&self) -> usize {
        match self.mode {
            StringMode::Single | StringMode::Quoted => 1,
            StringMode::Greedy | StringMode::GreedyFlagYielding => usize::MAX,
        }
    }

    fn config_key(&self) -> String {
        format!("string<{:?}>", self.mode)
    }
}

#[cfg(test)]
#[path = "string_tests.rs"]
mod tests;
