// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command definitions
//!
//! A [`Command`] is an ordered component list (root literal first), the
//! flags accepted after it, access requirements, metadata and a handler.
//! Commands are immutable once built; use [`Command::builder`].

use crate::component::CommandComponent;
use crate::context::CommandContext;
use crate::error::BuildError;
use crate::flag::CommandFlag;
use crate::parser::ArgumentParser;
use crate::permission::{CommandSender, Permission, SenderType};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Failure returned by a command handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Runs a parsed command.
#[async_trait]
pub trait CommandHandler<S>: Send + Sync + 'static {
    /// Execute against a fully parsed context. Handlers may store result
    /// values in the context.
    async fn execute(&self, context: &mut CommandContext<S>) -> Result<(), HandlerError>;
}

/// Adapts a synchronous closure into a [`CommandHandler`].
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<S, F> CommandHandler<S> for FnHandler<F>
where
    S: CommandSender,
    F: Fn(&mut CommandContext<S>) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    async fn execute(&self, context: &mut CommandContext<S>) -> Result<(), HandlerError> {
        (self.0)(context)
    }
}

/// Handler for commands registered without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpHandler;

#[async_trait]
impl<S: CommandSender> CommandHandler<S> for NoOpHandler {
    async fn execute(&self, _context: &mut CommandContext<S>) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Free-form command metadata, keyed by string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandMeta {
    entries: IndexMap<String, serde_json::Value>,
}

impl CommandMeta {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Deserialize the value under `key`; `None` when absent or mistyped.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// True when `key` holds boolean `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.get_as::<bool>(key).unwrap_or(false)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A complete, immutable command definition.
pub struct Command<S> {
    components: Vec<CommandComponent<S>>,
    flags: Vec<CommandFlag<S>>,
    permission: Permission<S>,
    sender_type: Option<SenderType<S>>,
    meta: CommandMeta,
    description: String,
    handler: Arc<dyn CommandHandler<S>>,
}

impl<S: CommandSender> Command<S> {
    /// Start a command whose root literal is `name`.
    pub fn builder(name: impl Into<String>) -> CommandBuilder<S> {
        Self::builder_with_aliases(name, Vec::<String>::new())
    }

    /// Start a command whose root literal is `name` with `aliases`.
    pub fn builder_with_aliases<I, A>(name: impl Into<String>, aliases: I) -> CommandBuilder<S>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        CommandBuilder {
            components: vec![CommandComponent::literal(name, aliases)],
            flags: Vec::new(),
            permission: Permission::Empty,
            sender_type: None,
            meta: CommandMeta::default(),
            description: String::new(),
            handler: None,
        }
    }
}

impl<S> Command<S> {
    pub fn components(&self) -> &[CommandComponent<S>] {
        &self.components
    }

    /// The root literal's name.
    pub fn root_name(&self) -> &str {
        self.components.first().map_or("", CommandComponent::name)
    }

    pub fn flags(&self) -> &[CommandFlag<S>] {
        &self.flags
    }

    pub fn permission(&self) -> &Permission<S> {
        &self.permission
    }

    pub fn sender_type(&self) -> Option<&SenderType<S>> {
        self.sender_type.as_ref()
    }

    pub fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn handler(&self) -> &Arc<dyn CommandHandler<S>> {
        &self.handler
    }

    /// Whether a flag named `name` belongs to this command.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag.name() == name)
    }
}

impl<S> fmt::Debug for Command<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.components.iter().map(CommandComponent::name).collect();
        f.debug_struct("Command")
            .field("components", &names)
            .field("flags", &self.flags.len())
            .field("permission", &self.permission.to_string())
            .finish()
    }
}

/// Builder for [`Command`].
pub struct CommandBuilder<S> {
    components: Vec<CommandComponent<S>>,
    flags: Vec<CommandFlag<S>>,
    permission: Permission<S>,
    sender_type: Option<SenderType<S>>,
    meta: CommandMeta,
    description: String,
    handler: Option<Arc<dyn CommandHandler<S>>>,
}

impl<S: CommandSender> CommandBuilder<S> {
    pub fn literal(self, name: impl Into<String>) -> Self {
        self.literal_with_aliases(name, Vec::<String>::new())
    }

    pub fn literal_with_aliases<I, A>(mut self, name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.components.push(CommandComponent::literal(name, aliases));
        self
    }

    /// Append a required argument.
    pub fn required<P: ArgumentParser<S>>(self, name: impl Into<String>, parser: P) -> Self {
        self.argument(CommandComponent::argument(name, parser))
    }

    /// Append an optional argument without a default.
    pub fn optional<P: ArgumentParser<S>>(self, name: impl Into<String>, parser: P) -> Self {
        self.argument(CommandComponent::argument(name, parser).optional())
    }

    /// Append a prebuilt component.
    pub fn argument(mut self, component: impl Into<CommandComponent<S>>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn flag(mut self, flag: CommandFlag<S>) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn permission(mut self, permission: impl Into<Permission<S>>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn sender_type(mut self, sender_type: SenderType<S>) -> Self {
        self.sender_type = Some(sender_type);
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key, value);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn handler(mut self, handler: impl CommandHandler<S>) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Use a synchronous closure as the handler.
    pub fn handler_fn<F>(self, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<S>) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.handler(FnHandler(handler))
    }

    pub fn build(self) -> Result<Command<S>, BuildError> {
        let mut names = HashSet::new();
        let mut seen_optional = false;
        for component in &self.components {
            if component.name().is_empty() {
                return Err(BuildError::EmptyName);
            }
            if component.is_literal() {
                if seen_optional {
                    return Err(BuildError::RequiredAfterOptional(component.name().to_string()));
                }
                continue;
            }
            if !names.insert(component.name()) {
                return Err(BuildError::DuplicateComponent(component.name().to_string()));
            }
            if component.is_required() && seen_optional {
                return Err(BuildError::RequiredAfterOptional(component.name().to_string()));
            }
            seen_optional |= !component.is_required();
        }

        let mut flag_names = HashSet::new();
        let mut flag_aliases = HashSet::new();
        for flag in &self.flags {
            if flag.name().is_empty() {
                return Err(BuildError::EmptyName);
            }
            if !flag_names.insert(flag.name()) {
                return Err(BuildError::DuplicateFlag(flag.name().to_string()));
            }
            for alias in flag.aliases() {
                if !flag_aliases.insert(*alias) {
                    return Err(BuildError::DuplicateFlag(format!("-{alias}")));
                }
            }
        }

        Ok(Command {
            components: self.components,
            flags: self.flags,
            permission: self.permission,
            sender_type: self.sender_type,
            meta: self.meta,
            description: self.description,
            handler: self.handler.unwrap_or_else(|| Arc::new(NoOpHandler)),
        })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
