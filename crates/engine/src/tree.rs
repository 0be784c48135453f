// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command routing tree
//!
//! Every registered command is a path from a root literal to the node that
//! owns it. Siblings are never ambiguous: literals may not share a name or
//! alias, and a node has at most one argument child (arguments with the same
//! name, value type and parser configuration share a node). Literal children
//! are kept ahead of the argument child so parsing tries them first.
//!
//! Each node also carries the permission and sender-type requirements of
//! every command routed through it, so access can be checked before
//! descending and inaccessible branches can be hidden from suggestions.

use crate::error::RegistrationError;
use crate::syntax::{command_syntax, component_syntax};
use indexmap::IndexSet;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;
use sy_core::flag::{flag_suggestions, is_known_flag, parse_flag, parse_flags};
use sy_core::input::is_flag_token;
use sy_core::{
    ArgumentTiming, Command, CommandComponent, CommandContext, CommandError, CommandFlag,
    CommandInput, CommandSender, FlagParseError, Permission, SenderType,
};

/// Component name reported for flag failures.
const FLAGS: &str = "flags";

struct Node<S> {
    component: CommandComponent<S>,
    children: Vec<Node<S>>,
    command: Option<Arc<Command<S>>>,
    /// Granted when the sender may run at least one command below.
    permission: Permission<S>,
    /// `None` when some command below accepts every sender.
    sender_types: Option<Vec<SenderType<S>>>,
    /// Flags of every command below, first declaration wins.
    flags: Vec<CommandFlag<S>>,
}

impl<S> Node<S> {
    fn new(component: CommandComponent<S>) -> Self {
        Self {
            component,
            children: Vec::new(),
            command: None,
            permission: Permission::Empty,
            sender_types: None,
            flags: Vec::new(),
        }
    }

    fn label(&self) -> String {
        component_syntax(&self.component)
    }

    fn commands_below(&self) -> Vec<&Arc<Command<S>>> {
        let mut out: Vec<&Arc<Command<S>>> = self.command.iter().collect();
        for child in &self.children {
            out.extend(child.commands_below());
        }
        out
    }

    /// Recompute derived metadata for this subtree.
    fn refresh(&mut self) {
        for child in &mut self.children {
            child.refresh();
        }
        let commands = self.commands_below();

        let permission = if commands.is_empty() || commands.iter().any(|c| c.permission().is_empty()) {
            Permission::Empty
        } else {
            let mut seen = IndexSet::new();
            let mut distinct: Vec<Permission<S>> = commands
                .iter()
                .map(|c| c.permission())
                .filter(|p| seen.insert(p.to_string()))
                .cloned()
                .collect();
            if distinct.len() == 1 {
                distinct.remove(0)
            } else {
                Permission::Or(distinct)
            }
        };

        let sender_types = if commands.iter().any(|c| c.sender_type().is_none()) {
            None
        } else {
            let mut seen = IndexSet::new();
            Some(
                commands
                    .iter()
                    .filter_map(|c| c.sender_type())
                    .filter(|t| seen.insert(t.name().to_string()))
                    .cloned()
                    .collect(),
            )
        };

        let mut seen = IndexSet::new();
        let flags: Vec<CommandFlag<S>> = commands
            .iter()
            .flat_map(|c| c.flags())
            .filter(|f| seen.insert(f.name().to_string()))
            .cloned()
            .collect();

        self.permission = permission;
        self.sender_types = sender_types;
        self.flags = flags;
    }

    /// Follow optional children to the nearest node owning a command.
    fn optional_terminal(&self) -> Option<&Node<S>> {
        let mut current = self;
        loop {
            if current.command.is_some() {
                return Some(current);
            }
            current = current
                .children
                .iter()
                .find(|child| !child.component.is_required())?;
        }
    }

    fn render(&self, depth: usize, out: &mut String) {
        let marker = if self.command.is_some() { " *" } else { "" };
        let _ = writeln!(out, "{}{}{}", "  ".repeat(depth), self.label(), marker);
        for child in &self.children {
            child.render(depth + 1, out);
        }
    }
}

impl<S: CommandSender> Node<S> {
    fn accessible(&self, sender: &S) -> bool {
        let type_ok = self
            .sender_types
            .as_ref()
            .map_or(true, |types| types.iter().any(|t| t.accepts(sender)));
        type_ok && self.permission.allows(sender)
    }
}

fn literal_in<'t, S>(nodes: &'t [Node<S>], token: &str) -> Option<&'t Node<S>> {
    nodes.iter().find(|node| node.component.matches_literal(token))
}

fn argument_in<S>(nodes: &[Node<S>]) -> Option<&Node<S>> {
    nodes.iter().find(|node| !node.component.is_literal())
}

/// The node `component` would share in `nodes`, if any.
fn matching<S>(nodes: &[Node<S>], component: &CommandComponent<S>) -> Option<usize> {
    nodes.iter().position(|node| {
        if component.is_literal() {
            node.component.is_literal() && node.component.name() == component.name()
        } else {
            node.component.merge_compatible(component)
        }
    })
}

fn labels<S>(nodes: &[Node<S>]) -> Vec<String> {
    nodes.iter().map(Node::label).collect()
}

fn chain<S>(path: &[&Node<S>]) -> Vec<String> {
    path.iter().map(|node| node.component.name().to_string()).collect()
}

/// Expected syntax at `node`: the full command when only one is reachable,
/// otherwise the path so far followed by the alternatives.
fn node_syntax<S>(path: &[&Node<S>], node: &Node<S>) -> String {
    let commands = node.commands_below();
    if let [only] = commands.as_slice() {
        return command_syntax(only);
    }
    let mut parts: Vec<String> = path.iter().map(|n| n.label()).collect();
    if !path.last().is_some_and(|last| std::ptr::eq(*last, node)) {
        parts.push(node.label());
    }
    if !node.children.is_empty() {
        parts.push(labels(&node.children).join("|"));
    }
    parts.join(" ")
}

/// The routing tree.
pub struct CommandTree<S> {
    roots: Vec<Node<S>>,
    /// Registered commands in registration order.
    order: Vec<Arc<Command<S>>>,
}

impl<S> Default for CommandTree<S> {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl<S: CommandSender> CommandTree<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every registered command in registration order.
    pub fn commands(&self) -> &[Arc<Command<S>>] {
        &self.order
    }

    /// Names of the root literals.
    pub fn root_names(&self) -> Vec<&str> {
        self.roots.iter().map(|node| node.component.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Indented listing of the tree; command-owning nodes end in `*`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            root.render(0, &mut out);
        }
        out
    }

    /// Add `command`, or replace an existing command on the same path when
    /// `replace` is set. The tree is unchanged on error.
    pub fn insert(
        &mut self,
        command: Command<S>,
        replace: bool,
    ) -> Result<Arc<Command<S>>, RegistrationError> {
        self.validate(&command, replace)?;
        let command = Arc::new(command);
        let replaced = self.attach(&command);

        match replaced.and_then(|old| self.order.iter().position(|c| Arc::ptr_eq(c, &old))) {
            Some(index) => self.order[index] = Arc::clone(&command),
            None => self.order.push(Arc::clone(&command)),
        }
        for root in &mut self.roots {
            root.refresh();
        }
        tracing::debug!(command = %command_syntax(&command), "registered command");
        Ok(command)
    }

    fn validate(&self, command: &Command<S>, replace: bool) -> Result<(), RegistrationError> {
        let components = command.components();
        match components.first() {
            Some(first) if first.is_literal() => {}
            Some(first) => return Err(RegistrationError::NonLiteralRoot(component_syntax(first))),
            None => return Err(RegistrationError::NonLiteralRoot(String::new())),
        }

        let mut siblings: &[Node<S>] = &self.roots;
        let mut parent = "(root)".to_string();
        let mut terminal: Option<&Node<S>> = None;

        for component in components {
            let ambiguous = || RegistrationError::AmbiguousNode {
                parent: parent.clone(),
                node: component_syntax(component),
                siblings: labels(siblings),
            };
            match matching(siblings, component) {
                Some(index) => {
                    // New aliases on a shared literal must not clash with its siblings.
                    let clash = siblings
                        .iter()
                        .enumerate()
                        .any(|(i, node)| i != index && node.component.collides_with(component));
                    if clash {
                        return Err(ambiguous());
                    }
                    let node = &siblings[index];
                    parent = node.label();
                    siblings = &node.children;
                    terminal = Some(node);
                }
                None => {
                    let conflict = siblings.iter().any(|node| {
                        if component.is_literal() {
                            node.component.collides_with(component)
                        } else {
                            !node.component.is_literal()
                        }
                    });
                    if conflict {
                        return Err(ambiguous());
                    }
                    // Everything below is new.
                    return Ok(());
                }
            }
        }

        match terminal.and_then(|node| node.command.as_ref()) {
            Some(existing) if !replace => {
                Err(RegistrationError::DuplicateCommand(command_syntax(existing)))
            }
            _ => Ok(()),
        }
    }

    /// Create the path for `command` and mark its terminal node. Returns the
    /// command previously owning that node.
    fn attach(&mut self, command: &Arc<Command<S>>) -> Option<Arc<Command<S>>> {
        let components = command.components();
        let (last, init) = components.split_last()?;
        let mut siblings = &mut self.roots;
        for component in init {
            let index = position_or_insert(siblings, component);
            siblings = &mut siblings[index].children;
        }
        let index = position_or_insert(siblings, last);
        siblings[index].command.replace(Arc::clone(command))
    }

    /// Remove the root literal `name` and every command below it.
    pub fn delete_root(&mut self, name: &str) -> Result<Vec<Arc<Command<S>>>, RegistrationError> {
        let index = self
            .roots
            .iter()
            .position(|node| node.component.matches_literal(name))
            .ok_or_else(|| RegistrationError::UnknownRootCommand(name.to_string()))?;
        let removed_node = self.roots.remove(index);
        let removed: Vec<Arc<Command<S>>> =
            removed_node.commands_below().into_iter().cloned().collect();
        self.order
            .retain(|command| !removed.iter().any(|r| Arc::ptr_eq(r, command)));
        tracing::debug!(root = name, commands = removed.len(), "deleted root command");
        Ok(removed)
    }

    /// Route `input` to a command, storing parsed values in `context`.
    ///
    /// Parsing is depth-first along a single path and never backtracks over
    /// consumed tokens. With `liberal_flags` set, known flags may appear
    /// between positional arguments.
    pub fn parse(
        &self,
        context: &mut CommandContext<S>,
        input: &mut CommandInput,
        liberal_flags: bool,
    ) -> Result<Arc<Command<S>>, CommandError<S>> {
        input.skip_whitespace();
        let token = input.peek_string();
        let Some(mut node) = literal_in(&self.roots, token) else {
            return Err(CommandError::NoSuchCommand {
                sender: Arc::clone(context.sender_arc()),
                input: token.to_string(),
                chain: Vec::new(),
            });
        };
        let mut path: Vec<&Node<S>> = Vec::new();

        loop {
            check_access(node, context, &path)?;
            consume(node, context, input, &path)?;
            path.push(node);

            if liberal_flags {
                while input.is_flag_start() && is_known_flag(&node.flags, input.peek_string()) {
                    parse_flag(&node.flags, context, input)
                        .map_err(|e| flag_error(context, &path, e))?;
                }
            }

            if input.is_empty() {
                let terminal = apply_defaults(node, context, &path)?;
                return finish(terminal, context, &path, liberal_flags);
            }

            let token = input.peek_string();
            if !liberal_flags && is_flag_token(token) {
                let with_flags = node
                    .optional_terminal()
                    .and_then(|t| t.command.as_ref())
                    .is_some_and(|c| !c.flags().is_empty());
                if with_flags {
                    let terminal = apply_defaults(node, context, &path)?;
                    if let Some(command) = &terminal.command {
                        parse_flags(command.flags(), context, input)
                            .map_err(|e| flag_error(context, &path, e))?;
                    }
                    return finish(terminal, context, &path, liberal_flags);
                }
            }

            if let Some(child) = literal_in(&node.children, token) {
                node = child;
                continue;
            }
            if let Some(child) = argument_in(&node.children) {
                node = child;
                continue;
            }
            if is_flag_token(token) {
                let error = FlagParseError::UnknownFlag(token.to_string());
                return Err(flag_error(context, &path, error));
            }
            return Err(CommandError::InvalidSyntax {
                sender: Arc::clone(context.sender_arc()),
                syntax: node_syntax(&path, node),
                chain: chain(&path),
            });
        }
    }

    /// Completion candidates for the final token of `input`.
    ///
    /// Returns the text the candidates complete (usually the last token)
    /// together with the candidates, deduplicated in production order.
    pub fn suggest(
        &self,
        context: &mut CommandContext<S>,
        input: &mut CommandInput,
    ) -> (String, Vec<String>) {
        let mut out = IndexSet::new();
        let partial = suggest_level(&self.roots, None, context, input, &mut out);
        tracing::trace!(partial = %partial, count = out.len(), "suggestions");
        (partial, out.into_iter().collect())
    }
}

fn position_or_insert<S>(nodes: &mut Vec<Node<S>>, component: &CommandComponent<S>) -> usize {
    if let Some(index) = matching(nodes, component) {
        nodes[index].component.merge_aliases(component.aliases());
        return index;
    }
    let node = Node::new(component.clone());
    if component.is_literal() {
        let index = nodes
            .iter()
            .position(|n| !n.component.is_literal())
            .unwrap_or(nodes.len());
        nodes.insert(index, node);
        index
    } else {
        nodes.push(node);
        nodes.len() - 1
    }
}

fn flag_error<S>(context: &CommandContext<S>, path: &[&Node<S>], error: FlagParseError) -> CommandError<S> {
    CommandError::ArgumentParse {
        sender: Arc::clone(context.sender_arc()),
        component: FLAGS.to_string(),
        chain: chain(path),
        source: Box::new(error),
    }
}

fn check_access<S: CommandSender>(
    node: &Node<S>,
    context: &CommandContext<S>,
    path: &[&Node<S>],
) -> Result<(), CommandError<S>> {
    let sender = context.sender();
    if let Some(types) = &node.sender_types {
        if !types.iter().any(|t| t.accepts(sender)) {
            let required: Vec<&str> = types.iter().map(SenderType::name).collect();
            return Err(CommandError::InvalidCommandSender {
                sender: Arc::clone(context.sender_arc()),
                required: required.join(" | "),
                chain: chain(path),
            });
        }
    }
    if let Some(denied) = node.permission.first_denied(sender) {
        return Err(CommandError::NoPermission {
            sender: Arc::clone(context.sender_arc()),
            permission: denied.to_string(),
            chain: chain(path),
        });
    }
    Ok(())
}

/// Consume the node's own component from the input.
fn consume<S>(
    node: &Node<S>,
    context: &mut CommandContext<S>,
    input: &mut CommandInput,
    path: &[&Node<S>],
) -> Result<(), CommandError<S>> {
    let Some(spec) = node.component.argument_spec() else {
        input.read_string();
        return Ok(());
    };
    let name = node.component.name();
    let start = Instant::now();
    let result = spec.parser().parse_value(context, input);
    context.record_timing(
        name,
        ArgumentTiming {
            elapsed: start.elapsed(),
            success: result.is_ok(),
        },
    );
    match result {
        Ok(value) => {
            context.store_boxed(name, value);
            Ok(())
        }
        Err(source) => Err(CommandError::ArgumentParse {
            sender: Arc::clone(context.sender_arc()),
            component: name.to_string(),
            chain: chain(path),
            source,
        }),
    }
}

/// Input ran out at `node`: walk optional children to a command, storing
/// their defaults.
fn apply_defaults<'t, S: CommandSender>(
    node: &'t Node<S>,
    context: &mut CommandContext<S>,
    path: &[&Node<S>],
) -> Result<&'t Node<S>, CommandError<S>> {
    let mut current = node;
    loop {
        if current.command.is_some() {
            return Ok(current);
        }
        let Some(child) = current.children.iter().find(|c| !c.component.is_required()) else {
            if current.children.is_empty() {
                return Err(CommandError::NoCommandInLeaf {
                    sender: Arc::clone(context.sender_arc()),
                    chain: chain(path),
                });
            }
            return Err(CommandError::InvalidSyntax {
                sender: Arc::clone(context.sender_arc()),
                syntax: node_syntax(path, current),
                chain: chain(path),
            });
        };
        check_access(child, context, path)?;
        if let Some(spec) = child.component.argument_spec() {
            if let Some(default) = spec.default_value() {
                let value = default.evaluate(context, spec.parser()).map_err(|source| {
                    CommandError::ArgumentParse {
                        sender: Arc::clone(context.sender_arc()),
                        component: child.component.name().to_string(),
                        chain: chain(path),
                        source,
                    }
                })?;
                context.store_boxed(child.component.name(), value);
            }
        }
        current = child;
    }
}

/// Check the routed command's own requirements.
fn finish<S: CommandSender>(
    terminal: &Node<S>,
    context: &CommandContext<S>,
    path: &[&Node<S>],
    liberal_flags: bool,
) -> Result<Arc<Command<S>>, CommandError<S>> {
    let Some(command) = &terminal.command else {
        return Err(CommandError::NoCommandInLeaf {
            sender: Arc::clone(context.sender_arc()),
            chain: chain(path),
        });
    };
    let sender = context.sender();
    if let Some(sender_type) = command.sender_type() {
        if !sender_type.accepts(sender) {
            return Err(CommandError::InvalidCommandSender {
                sender: Arc::clone(context.sender_arc()),
                required: sender_type.name().to_string(),
                chain: chain(path),
            });
        }
    }
    if let Some(denied) = command.permission().first_denied(sender) {
        return Err(CommandError::NoPermission {
            sender: Arc::clone(context.sender_arc()),
            permission: denied.to_string(),
            chain: chain(path),
        });
    }
    if liberal_flags {
        if let Some(stray) = context.flags().names().find(|name| !command.has_flag(name)) {
            let error = FlagParseError::UnknownFlag(format!("--{stray}"));
            return Err(flag_error(context, path, error));
        }
    }
    tracing::debug!(command = %command_syntax(command), "routed");
    Ok(Arc::clone(command))
}

/// Suggest the next component among `nodes`, the children of `parent`.
fn suggest_level<S: CommandSender>(
    nodes: &[Node<S>],
    parent: Option<&Node<S>>,
    context: &mut CommandContext<S>,
    input: &mut CommandInput,
    out: &mut IndexSet<String>,
) -> String {
    input.skip_whitespace();
    let terminal_flags = || {
        parent
            .and_then(Node::optional_terminal)
            .and_then(|t| t.command.as_ref())
            .map(|c| c.flags())
    };

    if input.remaining_tokens() <= 1 {
        let token = input.remaining().to_string();
        for node in nodes {
            if node.accessible(context.sender()) {
                out.extend(node.component.suggestions(context, &token));
            }
        }
        if token.starts_with('-') || (token.is_empty() && nodes.is_empty()) {
            if let Some(flags) = terminal_flags() {
                out.extend(flag_suggestions(flags, context, input));
            }
        }
        return token;
    }

    let token = input.peek_string();
    if is_flag_token(token) {
        if let Some(flags) = terminal_flags() {
            out.extend(flag_suggestions(flags, context, input));
            return input.remaining().to_string();
        }
        return String::new();
    }

    if let Some(node) = literal_in(nodes, token) {
        if !node.accessible(context.sender()) {
            return String::new();
        }
        input.read_string();
        return suggest_level(&node.children, Some(node), context, input, out);
    }

    let Some(node) = argument_in(nodes) else {
        return String::new();
    };
    let Some(spec) = node.component.argument_spec() else {
        return String::new();
    };
    if !node.accessible(context.sender()) {
        return String::new();
    }
    let parser = spec.parser();
    if input.remaining_tokens() <= parser.requested_tokens() {
        let text = input.remaining().to_string();
        out.extend(node.component.suggestions(context, &text));
        return text;
    }

    let start = input.cursor();
    match parser.parse_value(context, input) {
        Ok(value) => {
            context.store_boxed(node.component.name(), value);
            // A parser that swallowed the unterminated final token is still
            // being typed.
            if input.is_exhausted() && !input.at_token_boundary() {
                let text = input.read_since(start).trim().to_string();
                out.extend(node.component.suggestions(context, &text));
                return text;
            }
            suggest_level(&node.children, Some(node), context, input, out)
        }
        Err(_) if parser.continue_suggestions_after_failure() => {
            input.rewind(start);
            input.read_string();
            suggest_level(&node.children, Some(node), context, input, out)
        }
        Err(_) => String::new(),
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
