// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser for one of a fixed set of words.

use sy_core::{ArgumentParser, CommandContext, CommandInput, ParserError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceParseError {
    #[error("expected one of: {choices}")]
    Missing { choices: String },
    #[error("{input} is not one of: {choices}")]
    Invalid { input: String, choices: String },
}

/// Accepts one of `choices` and yields it in its declared spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceParser {
    choices: Vec<String>,
    case_sensitive: bool,
}

impl ChoiceParser {
    pub fn new<I, A>(choices: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    fn matches(&self, choice: &str, token: &str) -> bool {
        if self.case_sensitive {
            choice == token
        } else {
            choice.eq_ignore_ascii_case(token)
        }
    }

    fn listing(&self) -> String {
        self.choices.join(", ")
    }
}

impl<S> ArgumentParser<S> for ChoiceParser {
    type Value = String;

    fn parse(&self, _context: &CommandContext<S>, input: &mut CommandInput) -> Result<String, ParserError> {
        let token = input.peek_string();
        if token.is_empty() {
            return Err(ChoiceParseError::Missing {
                choices: self.listing(),
            }
            .into());
        }
        let Some(choice) = self.choices.iter().find(|c| self.matches(c, token)) else {
            return Err(ChoiceParseError::Invalid {
                input: token.to_string(),
                choices: self.listing(),
            }
            .into());
        };
        let choice = choice.clone();
        input.read_string();
        Ok(choice)
    }

    fn suggestions(&self, _context: &CommandContext<S>, input: &str) -> Vec<String> {
        self.choices
            .iter()
            .filter(|c| {
                if self.case_sensitive {
                    c.starts_with(input)
                } else {
                    c.to_ascii_lowercase().starts_with(&input.to_ascii_lowercase())
                }
            })
            .cloned()
            .collect()
    }

    fn config_key(&self) -> String {
        format!("choice<{}>[{}]", self.case_sensitive, self.choices.join("|"))
    }
}

#[cfg(test)]
#[path = "choice_tests.rs"]
mod tests;
