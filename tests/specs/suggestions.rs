// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use sy_parsers::ChoiceParser;

fn suggesting() -> Manager {
    let manager = manager();
    manager
        .command(
            Command::builder("give")
                .required(
                    "player",
                    ChoiceParser::new(["alice", "albert", "bob", "carol"]),
                )
                .required("amount", IntegerParser::<i32>::range(5, 100))
                .build()
                .unwrap(),
        )
        .unwrap();
    manager
        .command(Command::builder("gamemode").build().unwrap())
        .unwrap();
    manager
}

#[test]
fn root_suggestions_narrow_with_the_prefix() {
    let manager = suggesting();
    assert_eq!(manager.suggest(Player::new(&[]), ""), vec!["give", "gamemode"]);
    assert_eq!(manager.suggest(Player::new(&[]), "g"), vec!["give", "gamemode"]);
    assert_eq!(manager.suggest(Player::new(&[]), "ga"), vec!["gamemode"]);
    assert!(manager.suggest(Player::new(&[]), "x").is_empty());
}

#[test]
fn longer_prefixes_never_add_candidates() {
    let manager = suggesting();
    let word = "give albert";
    let mut previous: Option<Vec<String>> = None;
    for end in "give ".len()..=word.len() {
        let current = manager.suggest(Player::new(&[]), &word[..end]);
        if let Some(previous) = &previous {
            assert!(
                current.iter().all(|s| previous.contains(s)),
                "{current:?} is not a subset of {previous:?}"
            );
        }
        previous = Some(current);
    }
    assert_eq!(previous, Some(vec!["albert".to_string()]));
}

#[test]
fn bounded_integers_suggest_from_the_minimum() {
    let manager = suggesting();
    assert_eq!(
        manager.suggest(Player::new(&[]), "give bob "),
        vec!["5", "6", "7", "8", "9"]
    );
    assert_eq!(
        manager.suggest(Player::new(&[]), "give bob 9"),
        vec!["9", "90", "91", "92", "93", "94", "95", "96", "97", "98", "99"]
    );
}
