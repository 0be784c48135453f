// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help index
//!
//! A snapshot of registered commands that hosts can filter, group and query
//! to render help in whatever form they like.

use crate::syntax::{command_syntax, component_syntax};
use indexmap::IndexMap;
use serde::Serialize;
use std::hash::Hash;
use std::sync::Arc;
use sy_core::{Command, CommandComponent, CommandSender};

/// Help for one component or flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentHelp {
    pub syntax: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

/// Help for one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub syntax: String,
    pub description: String,
    pub components: Vec<ComponentHelp>,
    pub flags: Vec<ComponentHelp>,
}

impl HelpEntry {
    fn of<S>(command: &Command<S>) -> Self {
        Self {
            syntax: command_syntax(command),
            description: command.description().to_string(),
            components: command.components().iter().map(component_help).collect(),
            flags: command
                .flags()
                .iter()
                .map(|flag| ComponentHelp {
                    syntax: flag.syntax(),
                    description: flag.help_text().to_string(),
                    value_type: None,
                })
                .collect(),
        }
    }
}

fn component_help<S>(component: &CommandComponent<S>) -> ComponentHelp {
    ComponentHelp {
        syntax: component_syntax(component),
        description: component.description().to_string(),
        value_type: component.value_type().map(|t| t.short_name().to_string()),
    }
}

/// Answer to a help query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpQueryResult {
    /// Listing of commands; empty when nothing matched.
    Index(Vec<HelpEntry>),
    /// Exactly one command matched.
    Verbose(HelpEntry),
    /// Several commands share the queried prefix.
    Multiple { prefix: String, children: Vec<String> },
}

/// Snapshot of registered commands.
pub struct HelpIndex<S> {
    commands: Vec<Arc<Command<S>>>,
}

impl<S> Clone for HelpIndex<S> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
        }
    }
}

impl<S: CommandSender> HelpIndex<S> {
    pub fn new(commands: Vec<Arc<Command<S>>>) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn entries(&self) -> Vec<HelpEntry> {
        self.commands.iter().map(|c| HelpEntry::of(c)).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Command<S>) -> bool,
    {
        Self {
            commands: self.commands.iter().filter(|c| predicate(c)).cloned().collect(),
        }
    }

    /// Commands `sender` may run.
    pub fn visible_to(&self, sender: &S) -> Self {
        self.filter(|command| {
            command.permission().allows(sender)
                && command.sender_type().is_none_or(|t| t.accepts(sender))
        })
    }

    /// Entries grouped by `key`, groups in first-seen order.
    pub fn group_by<K, F>(&self, key: F) -> IndexMap<K, Vec<HelpEntry>>
    where
        K: Hash + Eq,
        F: Fn(&Command<S>) -> K,
    {
        let mut groups: IndexMap<K, Vec<HelpEntry>> = IndexMap::new();
        for command in &self.commands {
            groups.entry(key(command)).or_default().push(HelpEntry::of(command));
        }
        groups
    }

    /// Look up commands by a space-separated path.
    ///
    /// Literal tokens match names or aliases; argument tokens match the
    /// argument's name or usage form.
    pub fn query(&self, query: &str) -> HelpQueryResult {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        if tokens.is_empty() {
            return HelpQueryResult::Index(self.entries());
        }
        let matches: Vec<&Arc<Command<S>>> = self
            .commands
            .iter()
            .filter(|command| matches_path(command, &tokens))
            .collect();

        match matches.as_slice() {
            [] => HelpQueryResult::Index(Vec::new()),
            [command] => HelpQueryResult::Verbose(HelpEntry::of(command)),
            [first, ..] => HelpQueryResult::Multiple {
                prefix: first.components()[..tokens.len()]
                    .iter()
                    .map(component_syntax)
                    .collect::<Vec<_>>()
                    .join(" "),
                children: matches.iter().map(|c| command_syntax(c)).collect(),
            },
        }
    }
}

fn matches_path<S>(command: &Command<S>, tokens: &[&str]) -> bool {
    let components = command.components();
    tokens.len() <= components.len()
        && tokens.iter().zip(components).all(|(token, component)| {
            if component.is_literal() {
                component.matches_literal(token)
            } else {
                *token == component.name() || *token == component_syntax(component)
            }
        })
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
