// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Suggestion post-processing

use indexmap::IndexSet;
use sy_core::CommandContext;

/// Final pass over raw completion candidates.
///
/// `input` is the text the candidates complete.
pub trait SuggestionProcessor<S>: Send + Sync + 'static {
    fn process(&self, context: &CommandContext<S>, input: &str, suggestions: Vec<String>) -> Vec<String>;
}

/// Keeps candidates that start with the input, dropping duplicates.
#[derive(Debug, Clone, Copy)]
pub struct FilteringSuggestionProcessor {
    ignore_case: bool,
}

impl FilteringSuggestionProcessor {
    pub fn case_sensitive() -> Self {
        Self { ignore_case: false }
    }
}

impl Default for FilteringSuggestionProcessor {
    fn default() -> Self {
        Self { ignore_case: true }
    }
}

impl<S> SuggestionProcessor<S> for FilteringSuggestionProcessor {
    fn process(&self, _context: &CommandContext<S>, input: &str, suggestions: Vec<String>) -> Vec<String> {
        let prefix = if self.ignore_case { input.to_lowercase() } else { input.to_string() };
        let kept: IndexSet<String> = suggestions
            .into_iter()
            .filter(|s| {
                if self.ignore_case {
                    s.to_lowercase().starts_with(&prefix)
                } else {
                    s.starts_with(&prefix)
                }
            })
            .collect();
        kept.into_iter().collect()
    }
}

/// Sorts the output of another processor.
#[derive(Debug, Clone, Default)]
pub struct SortingSuggestionProcessor<P> {
    inner: P,
}

impl<P> SortingSuggestionProcessor<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<S, P: SuggestionProcessor<S>> SuggestionProcessor<S> for SortingSuggestionProcessor<P> {
    fn process(&self, context: &CommandContext<S>, input: &str, suggestions: Vec<String>) -> Vec<String> {
        let mut out = self.inner.process(context, input, suggestions);
        out.sort();
        out
    }
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod tests;
