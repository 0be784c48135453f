// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::permission::CommandSender;
use crate::test_support::{test_context, NumberParser, TestSender, WordParser};

type Component = CommandComponent<TestSender>;

#[test]
fn literal_matches_name_and_aliases() {
    let literal = Component::literal("teleport", ["tp"]);
    assert!(literal.matches_literal("teleport"));
    assert!(literal.matches_literal("tp"));
    assert!(!literal.matches_literal("tele"));
    assert_eq!(literal.names().collect::<Vec<_>>(), vec!["teleport", "tp"]);
}

#[test]
fn literal_suggestions_filter_by_prefix() {
    let literal = Component::literal("teleport", ["tp", "warp"]);
    let ctx = test_context();
    assert_eq!(literal.suggestions(&ctx, "t"), vec!["teleport", "tp"]);
    assert_eq!(literal.suggestions(&ctx, ""), vec!["teleport", "tp", "warp"]);
}

#[test]
fn literals_collide_on_any_shared_name() {
    let a = Component::literal("give", ["g"]);
    let b = Component::literal("gamemode", ["g"]);
    let c = Component::literal("gamemode", ["gm"]);
    assert!(a.collides_with(&b));
    assert!(!a.collides_with(&c));
}

#[test]
fn merging_aliases_skips_known_names() {
    let mut literal = Component::literal("give", ["g"]);
    literal.merge_aliases(&["g".to_string(), "give".to_string(), "gv".to_string()]);
    assert_eq!(literal.aliases(), &["g".to_string(), "gv".to_string()]);
}

#[test]
fn arguments_default_to_required() {
    let arg: Component = Component::argument("amount", NumberParser).build();
    assert!(arg.is_required());
    assert!(!arg.is_literal());
    assert_eq!(arg.value_type(), Some(ValueType::of::<i64>()));
}

#[test]
fn defaults_make_arguments_optional() {
    let arg: Component = Component::argument("amount", NumberParser)
        .default_value(10)
        .build();
    assert!(!arg.is_required());
    let spec = arg.argument_spec().unwrap();
    let ctx = test_context();
    let value = spec.default_value().unwrap().evaluate(&ctx, spec.parser()).unwrap();
    assert_eq!(value.downcast_ref::<i64>(), Some(&10));
}

#[test]
fn parsed_defaults_go_through_the_parser() {
    let arg: Component = Component::argument("amount", NumberParser)
        .default_parsed("42")
        .build();
    let spec = arg.argument_spec().unwrap();
    let ctx = test_context();
    let value = spec.default_value().unwrap().evaluate(&ctx, spec.parser()).unwrap();
    assert_eq!(value.downcast_ref::<i64>(), Some(&42));

    let broken: Component = Component::argument("amount", NumberParser)
        .default_parsed("many")
        .build();
    let spec = broken.argument_spec().unwrap();
    assert!(spec.default_value().unwrap().evaluate(&ctx, spec.parser()).is_err());
}

#[test]
fn dynamic_defaults_see_the_context() {
    let arg: Component = Component::argument("who", WordParser::default())
        .default_with(|ctx: &CommandContext<TestSender>| ctx.sender().name.clone())
        .build();
    let spec = arg.argument_spec().unwrap();
    let ctx = crate::test_support::context_for(TestSender::new("alice"), "");
    let value = spec.default_value().unwrap().evaluate(&ctx, spec.parser()).unwrap();
    assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("alice"));
}

#[test]
fn merge_compatibility_needs_name_and_type() {
    let a: Component = Component::argument("x", NumberParser).build();
    let same: Component = Component::argument("x", NumberParser).optional().build();
    let renamed: Component = Component::argument("y", NumberParser).build();
    let retyped: Component = Component::argument("x", WordParser::default()).build();
    assert!(a.merge_compatible(&same));
    assert!(!a.merge_compatible(&renamed));
    assert!(!a.merge_compatible(&retyped));
    assert!(!a.merge_compatible(&Component::literal("x", Vec::<String>::new())));
}

/// Completes the way the routing tree does, generic over any sender.
fn complete<S: CommandSender>(
    component: &CommandComponent<S>,
    context: &CommandContext<S>,
    input: &str,
) -> Vec<String> {
    component.suggestions(context, input)
}

#[test]
fn provider_suggestions_through_generic_sender() {
    let ctx = test_context();
    let provided: Component = Component::argument("w", WordParser::with_words(&["alpha"]))
        .suggestions(|ctx: &CommandContext<TestSender>, input: &str| {
            vec![format!("{}:{input}", ctx.sender().name)]
        })
        .build();
    assert_eq!(complete(&provided, &ctx, "al"), vec!["tester:al"]);
    assert_eq!(complete(&Component::literal("warp", ["w"]), &ctx, "w"), vec!["warp", "w"]);
}

#[test]
fn provider_overrides_parser_suggestions() {
    let ctx = test_context();
    let plain: Component = Component::argument("w", WordParser::with_words(&["alpha", "beta"])).build();
    assert_eq!(plain.suggestions(&ctx, "a"), vec!["alpha"]);

    let provided: Component = Component::argument("w", WordParser::with_words(&["alpha"]))
        .suggestions(|_: &CommandContext<TestSender>, input: &str| vec![format!("{input}!")])
        .build();
    assert_eq!(provided.suggestions(&ctx, "a"), vec!["a!"]);
}
