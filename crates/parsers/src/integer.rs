// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded integer parser with range-aware suggestions.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use sy_core::{ArgumentParser, CommandContext, CommandInput, ParserError};
use thiserror::Error;

/// Errors from integer parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberParseError {
    #[error("expected a number")]
    Missing,
    #[error("not a number: {0}")]
    NotANumber(String),
    #[error("{input} is not in range [{min}, {max}]")]
    OutOfRange {
        input: String,
        min: String,
        max: String,
    },
}

/// A primitive integer type the parser can produce.
pub trait Integer: Copy + PartialOrd + fmt::Display + FromStr + Send + Sync + 'static {
    const MIN: Self;
    const MAX: Self;

    fn to_i128(self) -> i128;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Integer for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                fn to_i128(self) -> i128 {
                    i128::from(self)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Parses one token as an integer within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegerParser<T> {
    min: T,
    max: T,
}

impl<T: Integer> IntegerParser<T> {
    /// Accept the full range of `T`.
    pub fn new() -> Self {
        Self {
            min: T::MIN,
            max: T::MAX,
        }
    }

    /// Accept `[min, max]`, both inclusive.
    pub fn range(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn has_min(&self) -> bool {
        self.min != T::MIN
    }

    pub fn has_max(&self) -> bool {
        self.max != T::MAX
    }
}

impl<T: Integer> Default for IntegerParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T: Integer> ArgumentParser<S> for IntegerParser<T> {
    type Value = T;

    fn parse(&self, _context: &CommandContext<S>, input: &mut CommandInput) -> Result<T, ParserError> {
        let token = input.peek_string();
        if token.is_empty() {
            return Err(NumberParseError::Missing.into());
        }
        let value = token
            .parse::<T>()
            .map_err(|_| NumberParseError::NotANumber(token.to_string()))?;
        if value < self.min || value > self.max {
            return Err(NumberParseError::OutOfRange {
                input: token.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            }
            .into());
        }
        input.read_string();
        Ok(value)
    }

    fn suggestions(&self, _context: &CommandContext<S>, input: &str) -> Vec<String> {
        number_suggestions(self.min.to_i128(), self.max.to_i128(), input)
    }

    fn config_key(&self) -> String {
        format!(
            "integer<{}>[{},{}]",
            std::any::type_name::<T>(),
            self.min,
            self.max
        )
    }
}

/// Completions for a partially typed number: the number itself and the ten
/// numbers one digit longer, kept only when inside `[min, max]`.
///
/// With bounds `[5, 100]` and empty input this yields `5..=9`.
pub fn number_suggestions(min: i128, max: i128, input: &str) -> Vec<String> {
    let negative = input.starts_with('-');
    let text = match input {
        "" | "-" => "0",
        other => other,
    };
    let Some(magnitude) = text.parse::<i128>().ok().and_then(i128::checked_abs) else {
        return Vec::new();
    };

    let mut numbers = BTreeSet::new();
    numbers.insert(magnitude);
    for digit in 0..10 {
        if let Some(next) = magnitude.checked_mul(10).and_then(|n| n.checked_add(digit)) {
            numbers.insert(next);
        }
    }

    numbers
        .into_iter()
        .map(|n| if negative { -n } else { n })
        .filter(|n| (min..=max).contains(n))
        .map(|n| n.to_string())
        .collect()
}

#[cfg(test)]
#[path = "integer_tests.rs"]
mod tests;
