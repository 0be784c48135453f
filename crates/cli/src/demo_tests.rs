// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sy_engine::ComponentHelp;

fn entry(syntax: &str, description: &str) -> HelpEntry {
    HelpEntry {
        syntax: syntax.to_string(),
        description: description.to_string(),
        components: Vec::new(),
        flags: Vec::new(),
    }
}

#[test]
fn index_lists_summaries() {
    let lines = render_help(HelpQueryResult::Index(vec![entry("stop", ""), entry("echo <message>", "Print")]));
    assert_eq!(lines, vec!["stop", "echo <message> - Print"]);
}

#[test]
fn empty_index_says_so() {
    assert_eq!(render_help(HelpQueryResult::Index(Vec::new())), vec!["no matching commands"]);
}

#[test]
fn verbose_lists_arguments_and_flags() {
    let mut give = entry("give <player> [amount] [--silent]", "Give items");
    give.components = vec![
        ComponentHelp {
            syntax: "give".to_string(),
            description: String::new(),
            value_type: None,
        },
        ComponentHelp {
            syntax: "[amount]".to_string(),
            description: "How many".to_string(),
            value_type: Some("u32".to_string()),
        },
    ];
    give.flags = vec![ComponentHelp {
        syntax: "[--silent]".to_string(),
        description: "Quietly".to_string(),
        value_type: None,
    }];
    assert_eq!(
        render_help(HelpQueryResult::Verbose(give)),
        vec![
            "usage: give <player> [amount] [--silent]",
            "Give items",
            "  [amount] (u32): How many",
            "  [--silent]: Quietly",
        ]
    );
}
