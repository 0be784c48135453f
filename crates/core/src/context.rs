// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-invocation command context.
//!
//! A [`CommandContext`] is created once per execution or suggestion request
//! and threads the sender, parsed argument values, parse timings and flag
//! values through the pipeline. Values are stored type-erased under string
//! keys; the last write to a key wins.

use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// A type-erased stored value.
pub type BoxedValue = Box<dyn Any + Send + Sync>;

/// Typed handle onto a context value.
pub struct ContextKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextKey").field(&self.name).finish()
    }
}

/// How long parsing one argument took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentTiming {
    pub elapsed: Duration,
    pub success: bool,
}

/// Parsed flag presence and values.
#[derive(Default)]
pub struct FlagContext {
    presence: IndexMap<String, usize>,
    values: IndexMap<String, Vec<BoxedValue>>,
}

impl FlagContext {
    /// Record one occurrence of a presence flag.
    pub fn add_presence(&mut self, name: &str) {
        *self.presence.entry(name.to_string()).or_default() += 1;
    }

    /// Record one value of a value flag.
    pub fn add_value(&mut self, name: &str, value: BoxedValue) {
        self.values.entry(name.to_string()).or_default().push(value);
    }

    /// Whether the flag appeared at all.
    pub fn is_present(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// How many times the flag appeared.
    pub fn count(&self, name: &str) -> usize {
        self.presence.get(name).copied().unwrap_or(0)
            + self.values.get(name).map_or(0, Vec::len)
    }

    /// First value of a value flag.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values
            .get(name)
            .and_then(|values| values.first())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// All values of a repeatable value flag, in input order.
    pub fn get_all<T: Any>(&self, name: &str) -> Vec<&T> {
        self.values
            .get(name)
            .map(|values| values.iter().filter_map(|v| v.downcast_ref::<T>()).collect())
            .unwrap_or_default()
    }

    /// Names of every flag that appeared, presence flags first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presence
            .keys()
            .chain(self.values.keys())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.presence.is_empty() && self.values.is_empty()
    }
}

impl fmt::Debug for FlagContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Per-invocation store threaded through parsing and execution.
pub struct CommandContext<S> {
    id: Uuid,
    sender: Arc<S>,
    raw_input: String,
    suggestions: bool,
    values: HashMap<String, BoxedValue>,
    timings: IndexMap<String, ArgumentTiming>,
    flags: FlagContext,
}

impl<S> CommandContext<S> {
    /// Context for executing `raw_input` on behalf of `sender`.
    pub fn new(sender: Arc<S>, raw_input: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            raw_input: raw_input.into(),
            suggestions: false,
            values: HashMap::new(),
            timings: IndexMap::new(),
            flags: FlagContext::default(),
        }
    }

    /// Context for computing suggestions for `raw_input`.
    pub fn for_suggestions(sender: Arc<S>, raw_input: impl Into<String>) -> Self {
        Self {
            suggestions: true,
            ..Self::new(sender, raw_input)
        }
    }

    /// Invocation id, unique per context.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Shared handle on the sender, for errors and results that outlive the
    /// context.
    pub fn sender_arc(&self) -> &Arc<S> {
        &self.sender
    }

    /// The input as the caller supplied it.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// True when this context is computing suggestions rather than executing.
    pub fn is_suggestions(&self) -> bool {
        self.suggestions
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn store<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Store an already-boxed value under `key`.
    pub fn store_boxed(&mut self, key: impl Into<String>, value: BoxedValue) {
        self.values.insert(key.into(), value);
    }

    /// Value stored under `key`, if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Value for a typed key.
    pub fn value<T: Any>(&self, key: &ContextKey<T>) -> Option<&T> {
        self.get::<T>(key.name())
    }

    /// Store under a typed key.
    pub fn set<T: Any + Send + Sync>(&mut self, key: &ContextKey<T>, value: T) {
        self.store(key.name(), value);
    }

    /// Value under `key`, or `default` when absent or of another type.
    pub fn get_or<T: Any + Clone>(&self, key: &str, default: T) -> T {
        self.get::<T>(key).cloned().unwrap_or(default)
    }

    /// Whether anything is stored under `key`, regardless of type.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove the value under `key`. Returns whether a value was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Keys of every stored value, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Record how long parsing `component` took.
    pub fn record_timing(&mut self, component: &str, timing: ArgumentTiming) {
        self.timings.insert(component.to_string(), timing);
    }

    /// Parse timings in the order arguments were parsed.
    pub fn timings(&self) -> &IndexMap<String, ArgumentTiming> {
        &self.timings
    }

    pub fn flags(&self) -> &FlagContext {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagContext {
        &mut self.flags
    }
}

impl<S> fmt::Debug for CommandContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("CommandContext")
            .field("id", &self.id)
            .field("raw_input", &self.raw_input)
            .field("suggestions", &self.suggestions)
            .field("keys", &keys)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
