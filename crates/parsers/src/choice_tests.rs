// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sy_core::test_support::{test_context, TestSender};

fn modes() -> ChoiceParser {
    ChoiceParser::new(["Survival", "Creative", "Spectator"])
}

fn parse(parser: &ChoiceParser, text: &str) -> Result<String, ParserError> {
    let ctx = test_context();
    let mut input = CommandInput::new(text);
    ArgumentParser::<TestSender>::parse(parser, &ctx, &mut input)
}

#[test]
fn yields_declared_spelling() {
    assert_eq!(parse(&modes(), "creative").unwrap(), "Creative");
}

#[test]
fn case_sensitive_rejects_other_case() {
    let parser = modes().case_sensitive();
    assert!(parse(&parser, "creative").is_err());
    assert_eq!(parse(&parser, "Creative").unwrap(), "Creative");
}

#[test]
fn invalid_lists_choices() {
    assert_eq!(
        parse(&modes(), "hardcore").unwrap_err().to_string(),
        "hardcore is not one of: Survival, Creative, Spectator"
    );
}

#[test]
fn suggestions_filter_by_prefix() {
    let ctx = test_context();
    assert_eq!(
        ArgumentParser::<TestSender>::suggestions(&modes(), &ctx, "s"),
        vec!["Survival", "Spectator"]
    );
}

#[test]
fn config_key_tracks_choices() {
    let a = ArgumentParser::<TestSender>::config_key(&modes());
    let b = ArgumentParser::<TestSender>::config_key(&ChoiceParser::new(["Survival"]));
    assert_ne!(a, b);
}
