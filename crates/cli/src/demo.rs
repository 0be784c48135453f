// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo command set registered by the CLI.

use crate::sender::ConsoleSender;
use anyhow::Result;
use std::sync::{Arc, Weak};
use sy_core::{
    Command, CommandComponent, CommandContext, CommandFlag, ErrorKind, HandlerError, SenderType,
};
use sy_engine::{
    CommandManager, ConfirmationManager, HandlerResult, HelpEntry, HelpQueryResult,
    REQUIRES_CONFIRMATION,
};
use sy_parsers::{BooleanParser, ChoiceParser, IntegerParser, StringParser, Uuid, UuidParser};

/// Context key under which a handler asks the session to run another line.
pub const RERUN: &str = "rerun";

type Manager = CommandManager<ConsoleSender>;
type Context = CommandContext<ConsoleSender>;

pub fn register(manager: &Arc<Manager>, confirmations: &ConfirmationManager<ConsoleSender>) -> Result<()> {
    manager.command(
        Command::builder("echo")
            .required("message", StringParser::greedy())
            .description("Print a message")
            .handler_fn(|context: &mut Context| {
                let message = value::<String>(context, "message")?;
                context.sender().send(message);
                Ok(())
            })
            .build()?,
    )?;

    for (operation, apply) in [("add", i64::checked_add as fn(i64, i64) -> Option<i64>), ("mul", i64::checked_mul)] {
        manager.command(
            Command::builder("math")
                .literal(operation)
                .required("a", IntegerParser::<i64>::new())
                .required("b", IntegerParser::<i64>::new())
                .description(format!("{operation} two integers"))
                .meta("category", "math")
                .handler_fn(move |context: &mut Context| {
                    let a = value::<i64>(context, "a")?;
                    let b = value::<i64>(context, "b")?;
                    let result = apply(a, b).ok_or("integer overflow")?;
                    context.sender().send(result.to_string());
                    Ok(())
                })
                .build()?,
        )?;
    }

    manager.command(
        Command::builder_with_aliases("give", ["g"])
            .required("player", ChoiceParser::new(["alice", "bob", "carol"]))
            .argument(
                CommandComponent::argument("amount", IntegerParser::<u32>::range(1, 64))
                    .default_value(1)
                    .description("How many, 1 to 64"),
            )
            .flag(CommandFlag::presence("silent").alias('s').description("Do not notify the player"))
            .flag(
                CommandFlag::value("reason", CommandComponent::argument("text", StringParser::quoted()))
                    .description("Reason shown to the player"),
            )
            .permission("demo.give")
            .description("Give items to a player")
            .meta("category", "admin")
            .handler_fn(|context: &mut Context| {
                let player = value::<String>(context, "player")?;
                let amount = value::<u32>(context, "amount")?;
                let mut message = format!("gave {amount} to {player}");
                if let Some(reason) = context.flags().get::<String>("reason") {
                    message.push_str(&format!(" ({reason})"));
                }
                if context.flags().is_present("silent") {
                    message.push_str(" silently");
                }
                context.sender().send(message);
                Ok(())
            })
            .build()?,
    )?;

    manager.command(
        Command::builder("toggle")
            .required("state", BooleanParser::liberal())
            .description("Switch something on or off")
            .handler_fn(|context: &mut Context| {
                let state = value::<bool>(context, "state")?;
                context.sender().send(if state { "toggled on" } else { "toggled off" });
                Ok(())
            })
            .build()?,
    )?;

    manager.command(
        Command::builder("lookup")
            .required("id", UuidParser)
            .description("Look up a record by id")
            .handler_fn(|context: &mut Context| {
                let id = value::<Uuid>(context, "id")?;
                context.sender().send(format!("no record for {id}"));
                Ok(())
            })
            .build()?,
    )?;

    manager.command(
        Command::builder("stop")
            .sender_type(SenderType::new("console", ConsoleSender::is_console))
            .meta(REQUIRES_CONFIRMATION, true)
            .description("Stop the host")
            .meta("category", "admin")
            .handler_fn(|context: &mut Context| {
                context.sender().send("stopping");
                Ok(())
            })
            .build()?,
    )?;

    let pending = confirmations.clone();
    manager.command(
        Command::builder("confirm")
            .description("Run the command awaiting confirmation")
            .handler_fn(move |context: &mut Context| {
                let input = pending.confirm(context.sender()).ok_or("nothing to confirm")?;
                context.store(RERUN, input);
                Ok(())
            })
            .build()?,
    )?;

    let weak = Arc::downgrade(manager);
    manager.command(
        Command::builder("help")
            .optional("query", StringParser::greedy())
            .description("Show help for commands")
            .handler_fn(move |context: &mut Context| help(&weak, context))
            .build()?,
    )?;

    manager.register_postprocessor(confirmations.postprocessor());
    manager
        .exception_controller()
        .register_handler(ErrorKind::NoSuchCommand, |exception| {
            if let Some(sender) = exception.error.sender() {
                sender.send(format!("{}; try `help`", exception.error));
            }
            HandlerResult::Handled
        });
    Ok(())
}

fn value<T: Clone + 'static>(context: &Context, key: &str) -> Result<T, HandlerError> {
    context
        .get::<T>(key)
        .cloned()
        .ok_or_else(|| format!("missing value: {key}").into())
}

fn help(manager: &Weak<Manager>, context: &mut Context) -> Result<(), HandlerError> {
    let manager = manager.upgrade().ok_or("command manager is gone")?;
    let query = context.get::<String>("query").cloned().unwrap_or_default();
    let index = manager.help_index().visible_to(context.sender());
    for line in render_help(index.query(&query)) {
        context.sender().send(line);
    }
    Ok(())
}

/// Text form of a help query result.
pub fn render_help(result: HelpQueryResult) -> Vec<String> {
    match result {
        HelpQueryResult::Index(entries) if entries.is_empty() => vec!["no matching commands".to_string()],
        HelpQueryResult::Index(entries) => entries.iter().map(summary).collect(),
        HelpQueryResult::Verbose(entry) => {
            let mut lines = vec![format!("usage: {}", entry.syntax)];
            if !entry.description.is_empty() {
                lines.push(entry.description.clone());
            }
            for component in entry.components.iter().filter(|c| c.value_type.is_some()) {
                let kind = component.value_type.as_deref().unwrap_or_default();
                let mut line = format!("  {} ({kind})", component.syntax);
                if !component.description.is_empty() {
                    line.push_str(&format!(": {}", component.description));
                }
                lines.push(line);
            }
            for flag in &entry.flags {
                let mut line = format!("  {}", flag.syntax);
                if !flag.description.is_empty() {
                    line.push_str(&format!(": {}", flag.description));
                }
                lines.push(line);
            }
            lines
        }
        HelpQueryResult::Multiple { prefix, children } => std::iter::once(format!("{prefix} ..."))
            .chain(children.into_iter().map(|child| format!("  {child}")))
            .collect(),
    }
}

fn summary(entry: &HelpEntry) -> String {
    if entry.description.is_empty() {
        entry.syntax.clone()
    } else {
        format!("{} - {}", entry.syntax, entry.description)
    }
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
