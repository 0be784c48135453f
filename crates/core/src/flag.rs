// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command flags
//!
//! Flags follow a command's positional components. Accepted forms:
//! - `--name` presence flag
//! - `--name <value>` value flag
//! - `-n` / `-n <value>` by single-character alias
//! - `-abc` several presence flags at once; only the last may take a value

use crate::component::CommandComponent;
use crate::context::CommandContext;
use crate::input::{is_flag_token, CommandInput};
use crate::parser::ParserError;
use crate::permission::{CommandSender, Permission};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing a flag section
#[derive(Debug, Error)]
pub enum FlagParseError {
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("duplicate flag: --{0}")]
    DuplicateFlag(String),
    #[error("expected a flag, found: {0}")]
    NoFlagStarted(String),
    #[error("missing value for flag: --{0}")]
    MissingArgument(String),
    #[error("no permission for flag --{flag}: {permission}")]
    NoPermission { flag: String, permission: String },
    #[error("invalid value for flag --{flag}: {source}")]
    Value {
        flag: String,
        #[source]
        source: ParserError,
    },
}

/// Whether a flag carries a value.
pub enum FlagKind<S> {
    Presence,
    Value(CommandComponent<S>),
}

impl<S> Clone for FlagKind<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Presence => Self::Presence,
            Self::Value(component) => Self::Value(component.clone()),
        }
    }
}

/// A named flag accepted after a command's positional components.
pub struct CommandFlag<S> {
    name: String,
    aliases: Vec<char>,
    description: String,
    kind: FlagKind<S>,
    repeatable: bool,
    permission: Permission<S>,
}

impl<S> CommandFlag<S> {
    /// A flag that is either present or not.
    pub fn presence(name: impl Into<String>) -> Self {
        Self::with_kind(name, FlagKind::Presence)
    }

    /// A flag followed by a value parsed by `component`.
    pub fn value(name: impl Into<String>, component: impl Into<CommandComponent<S>>) -> Self {
        Self::with_kind(name, FlagKind::Value(component.into()))
    }

    fn with_kind(name: impl Into<String>, kind: FlagKind<S>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            kind,
            repeatable: false,
            permission: Permission::Empty,
        }
    }

    pub fn alias(mut self, alias: char) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn permission(mut self, permission: impl Into<Permission<S>>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[char] {
        &self.aliases
    }

    pub fn kind(&self) -> &FlagKind<S> {
        &self.kind
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn required_permission(&self) -> &Permission<S> {
        &self.permission
    }

    pub fn help_text(&self) -> &str {
        &self.description
    }

    pub fn takes_value(&self) -> bool {
        matches!(self.kind, FlagKind::Value(_))
    }

    /// Usage form: `[--name]` or `[--name <value>]`.
    pub fn syntax(&self) -> String {
        match &self.kind {
            FlagKind::Presence => format!("[--{}]", self.name),
            FlagKind::Value(component) => format!("[--{} <{}>]", self.name, component.name()),
        }
    }
}

impl<S> Clone for CommandFlag<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            description: self.description.clone(),
            kind: self.kind.clone(),
            repeatable: self.repeatable,
            permission: self.permission.clone(),
        }
    }
}

impl<S> fmt::Debug for CommandFlag<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandFlag")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("takes_value", &self.takes_value())
            .field("repeatable", &self.repeatable)
            .finish()
    }
}

fn by_name<'a, S>(flags: &'a [CommandFlag<S>], name: &str) -> Option<&'a CommandFlag<S>> {
    flags.iter().find(|flag| flag.name == name)
}

fn by_alias<S>(flags: &[CommandFlag<S>], alias: char) -> Option<&CommandFlag<S>> {
    flags.iter().find(|flag| flag.aliases.contains(&alias))
}

/// Resolve a flag token to the flags it names. `-abc` yields three flags.
fn resolve<'a, S>(
    flags: &'a [CommandFlag<S>],
    token: &str,
) -> Result<Vec<&'a CommandFlag<S>>, FlagParseError> {
    if let Some(long) = token.strip_prefix("--") {
        return by_name(flags, long)
            .map(|flag| vec![flag])
            .ok_or_else(|| FlagParseError::UnknownFlag(token.to_string()));
    }
    let shorts = token.strip_prefix('-').unwrap_or(token);
    let resolved = shorts
        .chars()
        .map(|alias| by_alias(flags, alias).ok_or_else(|| FlagParseError::UnknownFlag(format!("-{alias}"))))
        .collect::<Result<Vec<_>, _>>()?;
    // Only the last flag of a group can consume the following token.
    if let Some((_, head)) = resolved.split_last() {
        if let Some(flag) = head.iter().find(|flag| flag.takes_value()) {
            return Err(FlagParseError::MissingArgument(flag.name.clone()));
        }
    }
    Ok(resolved)
}

/// Whether `token` names a flag in `flags`.
pub fn is_known_flag<S>(flags: &[CommandFlag<S>], token: &str) -> bool {
    is_flag_token(token) && resolve(flags, token).is_ok()
}

/// Parse a single flag token (and its value) at the cursor into `context`.
pub fn parse_flag<S: CommandSender>(
    flags: &[CommandFlag<S>],
    context: &mut CommandContext<S>,
    input: &mut CommandInput,
) -> Result<(), FlagParseError> {
    let token = input.peek_string().to_string();
    if !is_flag_token(&token) {
        return Err(FlagParseError::NoFlagStarted(token));
    }
    let resolved = resolve(flags, &token)?;
    input.read_string();

    for flag in resolved {
        if let Some(denied) = flag.permission.first_denied(context.sender()) {
            return Err(FlagParseError::NoPermission {
                flag: flag.name.clone(),
                permission: denied.to_string(),
            });
        }
        if !flag.repeatable && context.flags().is_present(&flag.name) {
            return Err(FlagParseError::DuplicateFlag(flag.name.clone()));
        }
        match &flag.kind {
            FlagKind::Presence => context.flags_mut().add_presence(&flag.name),
            FlagKind::Value(component) => {
                let Some(spec) = component.argument_spec() else {
                    // A literal value component only checks the token.
                    let value = input.peek_string().to_string();
                    if !component.matches_literal(&value) {
                        return Err(FlagParseError::MissingArgument(flag.name.clone()));
                    }
                    input.read_string();
                    context.flags_mut().add_value(&flag.name, Box::new(value));
                    continue;
                };
                if input.is_empty() {
                    return Err(FlagParseError::MissingArgument(flag.name.clone()));
                }
                let value = spec
                    .parser()
                    .parse_value(context, input)
                    .map_err(|source| FlagParseError::Value {
                        flag: flag.name.clone(),
                        source,
                    })?;
                context.flags_mut().add_value(&flag.name, value);
            }
        }
    }
    Ok(())
}

/// Parse every remaining token as flags.
pub fn parse_flags<S: CommandSender>(
    flags: &[CommandFlag<S>],
    context: &mut CommandContext<S>,
    input: &mut CommandInput,
) -> Result<(), FlagParseError> {
    while !input.is_empty() {
        parse_flag(flags, context, input)?;
    }
    Ok(())
}

/// Completion candidates for a flag section.
///
/// Completed flags (and their values) are skipped. For the final token this
/// offers the values of a pending value flag, or the long and short forms of
/// every flag that is still usable.
pub fn flag_suggestions<S: CommandSender>(
    flags: &[CommandFlag<S>],
    context: &CommandContext<S>,
    input: &mut CommandInput,
) -> Vec<String> {
    let mut used: HashSet<&str> = context.flags().names().collect();
    input.skip_whitespace();

    while input.remaining_tokens() > 1 {
        let token = input.peek_string().to_string();
        let Ok(resolved) = resolve(flags, &token) else {
            return Vec::new();
        };
        input.read_string();
        for flag in resolved {
            used.insert(flag.name.as_str());
            if let FlagKind::Value(component) = &flag.kind {
                if input.remaining_tokens() <= 1 {
                    return component.suggestions(context, input.remaining());
                }
                input.read_string();
            }
        }
    }

    let prefix = input.remaining();
    if !prefix.is_empty() && !prefix.starts_with('-') {
        return Vec::new();
    }
    let sender = context.sender();
    let mut out = Vec::new();
    for flag in flags {
        if (used.contains(flag.name.as_str()) && !flag.repeatable)
            || !flag.permission.allows(sender)
        {
            continue;
        }
        let long = format!("--{}", flag.name);
        if long.starts_with(prefix) {
            out.push(long);
        }
        for alias in &flag.aliases {
            let short = format!("-{alias}");
            if short.starts_with(prefix) {
                out.push(short);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "flag_tests.rs"]
mod tests;
