// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sy_core::test_support::TestSender;
use sy_core::CommandFlag;
use sy_parsers::{IntegerParser, StringParser};

#[test]
fn renders_components_and_flags() {
    let command = Command::<TestSender>::builder("give")
        .required("player", StringParser::single())
        .optional("amount", IntegerParser::<u32>::new())
        .flag(CommandFlag::presence("silent"))
        .flag(CommandFlag::value(
            "reason",
            CommandComponent::argument("text", StringParser::single()),
        ))
        .build()
        .unwrap();
    assert_eq!(
        command_syntax(&command),
        "give <player> [amount] [--silent] [--reason <text>]"
    );
}

#[test]
fn literal_only_command() {
    let command = Command::<TestSender>::builder("reload")
        .literal("all")
        .build()
        .unwrap();
    assert_eq!(command_syntax(&command), "reload all");
}
