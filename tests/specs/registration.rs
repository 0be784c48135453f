// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use similar_asserts::assert_eq;
use sy_engine::RegistrationError;

fn give(amount: IntegerParser<u32>) -> Command<Player> {
    Command::builder("give")
        .required("player", StringParser::single())
        .required("amount", amount)
        .build()
        .unwrap()
}

#[test]
fn ambiguous_registration_leaves_the_tree_untouched() {
    let manager = manager();
    manager.command(give(IntegerParser::range(1, 64))).unwrap();
    let before = manager.render_tree();

    // Same position, different argument name.
    let clash = Command::builder("give")
        .required("target", StringParser::single())
        .build()
        .unwrap();
    let err = manager.command(clash).unwrap_err();
    assert!(matches!(err, RegistrationError::AmbiguousNode { .. }), "{err}");

    // Same name, different parser configuration.
    let err = manager.command(give(IntegerParser::range(1, 10))).unwrap_err();
    assert!(matches!(err, RegistrationError::AmbiguousNode { .. }), "{err}");

    assert_eq!(manager.render_tree(), before);
    assert_eq!(manager.commands().len(), 1);
}

#[test]
fn compatible_arguments_merge_into_one_node() {
    let manager = manager();
    manager.command(give(IntegerParser::range(1, 64))).unwrap();
    manager
        .command(
            Command::builder("give")
                .required("player", StringParser::single())
                .literal("all")
                .build()
                .unwrap(),
        )
        .unwrap();
    let after_first_merge = manager.render_tree();
    assert_eq!(
        after_first_merge,
        "give\n  <player>\n    all *\n    <amount> *\n"
    );

    // Registering an equivalent command again is rejected and changes nothing.
    assert!(matches!(
        manager.command(give(IntegerParser::range(1, 64))),
        Err(RegistrationError::DuplicateCommand(_))
    ));
    assert_eq!(manager.render_tree(), after_first_merge);
}

#[tokio::test]
async fn deleting_a_root_removes_its_commands() {
    let manager = manager_with(ManagerSettings {
        root_command_deletion: true,
        ..ManagerSettings::default()
    });
    manager.command(give(IntegerParser::range(1, 64))).unwrap();
    manager
        .command(Command::builder("stop").build().unwrap())
        .unwrap();

    succeed(&manager, "give bob 3").await;
    manager.delete_root_command("give").unwrap();

    assert_eq!(fail_kind(&manager, "give bob 3").await, ErrorKind::NoSuchCommand);
    succeed(&manager, "stop").await;
    assert_eq!(manager.root_commands(), vec!["stop".to_string()]);
    assert_eq!(manager.render_tree(), "stop *\n");
    assert!(manager.suggest(Player::new(&[]), "gi").is_empty());
}
