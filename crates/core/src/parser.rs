// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument parser contract.
//!
//! Concrete parsers implement [`ArgumentParser`] for a value type. The tree
//! stores them type-erased as [`ErasedParser`] so components of different
//! value types can live side by side.

use crate::context::{BoxedValue, CommandContext};
use crate::input::CommandInput;
use std::any::{Any, TypeId};
use std::fmt;

/// Failure reported by an argument parser.
pub type ParserError = Box<dyn std::error::Error + Send + Sync>;

/// Parses one argument from the token cursor.
pub trait ArgumentParser<S>: Send + Sync + 'static {
    /// The parsed value type.
    type Value: Any + Send + Sync;

    /// Parse a value, consuming the tokens it used.
    fn parse(
        &self,
        context: &CommandContext<S>,
        input: &mut CommandInput,
    ) -> Result<Self::Value, ParserError>;

    /// Completion candidates for `input`, the text typed so far.
    fn suggestions(&self, _context: &CommandContext<S>, _input: &str) -> Vec<String> {
        Vec::new()
    }

    /// How many tokens the parser wants. `usize::MAX` for greedy parsers.
    fn requested_tokens(&self) -> usize {
        1
    }

    /// Identity of the parser's configuration. Argument components merge in
    /// the tree only when their keys are equal.
    fn config_key(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Whether suggestion traversal may skip past a token this parser
    /// rejected and keep completing later components.
    fn continue_suggestions_after_failure(&self) -> bool {
        false
    }
}

/// Runtime identity of a parsed value type.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path, e.g. `i32` or `String`.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Object-safe view of an [`ArgumentParser`].
pub trait ErasedParser<S>: Send + Sync {
    fn parse_value(
        &self,
        context: &CommandContext<S>,
        input: &mut CommandInput,
    ) -> Result<BoxedValue, ParserError>;

    fn suggestions(&self, context: &CommandContext<S>, input: &str) -> Vec<String>;

    fn requested_tokens(&self) -> usize;

    fn config_key(&self) -> String;

    fn continue_suggestions_after_failure(&self) -> bool;

    fn value_type(&self) -> ValueType;
}

struct Erased<P>(P);

impl<S, P> ErasedParser<S> for Erased<P>
where
    P: ArgumentParser<S>,
{
    fn parse_value(
        &self,
        context: &CommandContext<S>,
        input: &mut CommandInput,
    ) -> Result<BoxedValue, ParserError> {
        let value = self.0.parse(context, input)?;
        Ok(Box::new(value))
    }

    fn suggestions(&self, context: &CommandContext<S>, input: &str) -> Vec<String> {
        self.0.suggestions(context, input)
    }

    fn requested_tokens(&self) -> usize {
        self.0.requested_tokens()
    }

    fn config_key(&self) -> String {
        self.0.config_key()
    }

    fn continue_suggestions_after_failure(&self) -> bool {
        self.0.continue_suggestions_after_failure()
    }

    fn value_type(&self) -> ValueType {
        ValueType::of::<P::Value>()
    }
}

/// Box a parser behind the object-safe interface.
pub fn erase<S, P>(parser: P) -> std::sync::Arc<dyn ErasedParser<S>>
where
    S: 'static,
    P: ArgumentParser<S>,
{
    std::sync::Arc::new(Erased(parser))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
