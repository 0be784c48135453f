// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command components: literals and typed arguments.

use crate::context::{BoxedValue, CommandContext};
use crate::input::CommandInput;
use crate::parser::{erase, ArgumentParser, ErasedParser, ParserError, ValueType};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Completion source for an argument, overriding its parser's suggestions.
pub trait SuggestionProvider<S>: Send + Sync + 'static {
    fn suggestions(&self, context: &CommandContext<S>, input: &str) -> Vec<String>;
}

impl<S, F> SuggestionProvider<S> for F
where
    F: Fn(&CommandContext<S>, &str) -> Vec<String> + Send + Sync + 'static,
{
    fn suggestions(&self, context: &CommandContext<S>, input: &str) -> Vec<String> {
        self(context, input)
    }
}

type DefaultFn<S> = Arc<dyn Fn(&CommandContext<S>) -> BoxedValue + Send + Sync>;

/// Value used when an optional argument is absent from the input.
pub enum DefaultValue<S> {
    /// Computed from the context at parse time; constants are a special case.
    Dynamic(DefaultFn<S>),
    /// Text run through the argument's own parser.
    Parsed(String),
}

impl<S> DefaultValue<S> {
    /// Produce the default, parsing [`DefaultValue::Parsed`] text with `parser`.
    pub fn evaluate(
        &self,
        context: &CommandContext<S>,
        parser: &dyn ErasedParser<S>,
    ) -> Result<BoxedValue, ParserError> {
        match self {
            Self::Dynamic(supplier) => Ok(supplier(context)),
            Self::Parsed(text) => {
                let mut input = CommandInput::new(text.as_str());
                parser.parse_value(context, &mut input)
            }
        }
    }
}

impl<S> Clone for DefaultValue<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Dynamic(supplier) => Self::Dynamic(Arc::clone(supplier)),
            Self::Parsed(text) => Self::Parsed(text.clone()),
        }
    }
}

/// Parser, default and suggestion policy of an argument component.
pub struct ArgumentSpec<S> {
    parser: Arc<dyn ErasedParser<S>>,
    default: Option<DefaultValue<S>>,
    suggestions: Option<Arc<dyn SuggestionProvider<S>>>,
}

impl<S> ArgumentSpec<S> {
    pub fn parser(&self) -> &dyn ErasedParser<S> {
        self.parser.as_ref()
    }

    pub fn default_value(&self) -> Option<&DefaultValue<S>> {
        self.default.as_ref()
    }

    pub fn value_type(&self) -> ValueType {
        self.parser.value_type()
    }

    /// Suggestions from the provider if one is set, else from the parser.
    pub fn suggestions(&self, context: &CommandContext<S>, input: &str) -> Vec<String>
    where
        S: 'static,
    {
        match &self.suggestions {
            Some(provider) => provider.suggestions(context, input),
            None => self.parser.suggestions(context, input),
        }
    }
}

impl<S> Clone for ArgumentSpec<S> {
    fn clone(&self) -> Self {
        Self {
            parser: Arc::clone(&self.parser),
            default: self.default.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

/// What a component matches.
pub enum ComponentKind<S> {
    /// Exact text, by name or alias.
    Literal { aliases: Vec<String> },
    /// A value produced by a parser.
    Argument(ArgumentSpec<S>),
}

impl<S> Clone for ComponentKind<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal { aliases } => Self::Literal {
                aliases: aliases.clone(),
            },
            Self::Argument(spec) => Self::Argument(spec.clone()),
        }
    }
}

/// One position in a command's definition.
pub struct CommandComponent<S> {
    name: String,
    kind: ComponentKind<S>,
    required: bool,
    description: String,
}

impl<S> CommandComponent<S> {
    /// A literal matched by `name` or any of `aliases`.
    pub fn literal<I, A>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            kind: ComponentKind::Literal {
                aliases: aliases.into_iter().map(Into::into).collect(),
            },
            required: true,
            description: String::new(),
        }
    }

    /// Start building a required argument parsed by `parser`.
    pub fn argument<P>(name: impl Into<String>, parser: P) -> ArgumentBuilder<S, P::Value>
    where
        S: 'static,
        P: ArgumentParser<S>,
    {
        ArgumentBuilder {
            name: name.into(),
            parser: erase(parser),
            required: true,
            default: None,
            suggestions: None,
            description: String::new(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ComponentKind<S> {
        &self.kind
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ComponentKind::Literal { .. })
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Literal aliases; empty for arguments.
    pub fn aliases(&self) -> &[String] {
        match &self.kind {
            ComponentKind::Literal { aliases } => aliases,
            ComponentKind::Argument(_) => &[],
        }
    }

    /// Name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases().iter().map(String::as_str))
    }

    /// Whether `token` selects this literal. Always false for arguments.
    pub fn matches_literal(&self, token: &str) -> bool {
        self.is_literal() && self.names().any(|name| name == token)
    }

    pub fn argument_spec(&self) -> Option<&ArgumentSpec<S>> {
        match &self.kind {
            ComponentKind::Literal { .. } => None,
            ComponentKind::Argument(spec) => Some(spec),
        }
    }

    pub fn value_type(&self) -> Option<ValueType> {
        self.argument_spec().map(ArgumentSpec::value_type)
    }

    /// Whether two argument components can share a tree node: same name,
    /// value type and parser configuration.
    pub fn merge_compatible(&self, other: &Self) -> bool {
        match (self.argument_spec(), other.argument_spec()) {
            (Some(a), Some(b)) => {
                self.name == other.name
                    && a.value_type() == b.value_type()
                    && a.parser.config_key() == b.parser.config_key()
            }
            _ => false,
        }
    }

    /// Whether two literals share a name or alias.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.is_literal() && other.is_literal() && self.names().any(|name| other.matches_literal(name))
    }

    /// Add aliases to a literal, skipping ones it already has.
    pub fn merge_aliases(&mut self, extra: &[String]) {
        if let ComponentKind::Literal { aliases } = &mut self.kind {
            for alias in extra {
                if alias != &self.name && !aliases.contains(alias) {
                    aliases.push(alias.clone());
                }
            }
        }
    }

    /// Completion candidates for `input`: prefix-matching names for
    /// literals, provider or parser output for arguments.
    pub fn suggestions(&self, context: &CommandContext<S>, input: &str) -> Vec<String>
    where
        S: 'static,
    {
        match &self.kind {
            ComponentKind::Literal { .. } => self
                .names()
                .filter(|name| name.starts_with(input))
                .map(str::to_string)
                .collect(),
            ComponentKind::Argument(spec) => spec.suggestions(context, input),
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl<S> Clone for CommandComponent<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
            required: self.required,
            description: self.description.clone(),
        }
    }
}

impl<S> fmt::Debug for CommandComponent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("CommandComponent");
        s.field("name", &self.name);
        match &self.kind {
            ComponentKind::Literal { aliases } => s.field("aliases", aliases),
            ComponentKind::Argument(spec) => s.field("value_type", &spec.value_type()),
        };
        s.field("required", &self.required).finish()
    }
}

/// Builder for an argument component producing values of type `T`.
pub struct ArgumentBuilder<S, T> {
    name: String,
    parser: Arc<dyn ErasedParser<S>>,
    required: bool,
    default: Option<DefaultValue<S>>,
    suggestions: Option<Arc<dyn SuggestionProvider<S>>>,
    description: String,
    _marker: PhantomData<fn() -> T>,
}

impl<S: 'static, T: Any + Send + Sync> ArgumentBuilder<S, T> {
    /// Make the argument optional with no default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Make the argument optional, defaulting to `value`.
    pub fn default_value(self, value: T) -> Self
    where
        T: Clone,
    {
        self.default_with(move |_| value.clone())
    }

    /// Make the argument optional, computing its default from the context.
    pub fn default_with<F>(mut self, supplier: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> T + Send + Sync + 'static,
    {
        self.required = false;
        self.default = Some(DefaultValue::Dynamic(Arc::new(move |ctx| {
            Box::new(supplier(ctx)) as BoxedValue
        })));
        self
    }

    /// Make the argument optional, parsing `text` with its parser when absent.
    pub fn default_parsed(mut self, text: impl Into<String>) -> Self {
        self.required = false;
        self.default = Some(DefaultValue::Parsed(text.into()));
        self
    }

    /// Replace the parser's suggestions.
    pub fn suggestions(mut self, provider: impl SuggestionProvider<S>) -> Self {
        self.suggestions = Some(Arc::new(provider));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> CommandComponent<S> {
        CommandComponent {
            name: self.name,
            kind: ComponentKind::Argument(ArgumentSpec {
                parser: self.parser,
                default: self.default,
                suggestions: self.suggestions,
            }),
            required: self.required,
            description: self.description,
        }
    }
}

impl<S: 'static, T: Any + Send + Sync> From<ArgumentBuilder<S, T>> for CommandComponent<S> {
    fn from(builder: ArgumentBuilder<S, T>) -> Self {
        builder.build()
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
