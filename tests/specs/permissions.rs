// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting(granted: bool, calls: &Arc<AtomicUsize>) -> Permission<Player> {
    let calls = Arc::clone(calls);
    Permission::predicate("counted", move |_: &Player| {
        calls.fetch_add(1, Ordering::SeqCst);
        granted
    })
}

#[test]
fn disjunction_stops_at_first_grant() {
    let calls = Arc::new(AtomicUsize::new(0));
    let permission = Permission::any([Permission::node("admin"), counting(true, &calls)]);

    assert!(permission.allows(&Player::new(&["admin"])));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(permission.allows(&Player::new(&[])));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn conjunction_stops_at_first_denial() {
    let calls = Arc::new(AtomicUsize::new(0));
    let permission = Permission::all([Permission::node("admin"), counting(true, &calls)]);

    assert!(!permission.allows(&Player::new(&[])));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        permission.first_denied(&Player::new(&[])).map(ToString::to_string),
        Some("admin".to_string())
    );
}

fn guarded() -> Manager {
    let manager = manager();
    manager
        .command(
            Command::builder("ban")
                .required("player", StringParser::single())
                .permission(Permission::any([
                    Permission::node("mod.ban"),
                    Permission::node("admin"),
                ]))
                .build()
                .unwrap(),
        )
        .unwrap();
    manager
        .command(Command::builder("balance").build().unwrap())
        .unwrap();
    manager
}

#[tokio::test]
async fn denied_sender_gets_no_permission() {
    let manager = guarded();
    let outcome = manager.execute(Player::new(&[]), "ban bob").await;
    let error = outcome.error().unwrap();
    assert_eq!(error.kind(), ErrorKind::NoPermission);
    assert!(error.kind().is_a(ErrorKind::CommandParse));
    assert_eq!(error.to_string(), "missing permission: (mod.ban | admin)");

    let outcome = manager.execute(Player::new(&["admin"]), "ban bob").await;
    assert!(outcome.is_success(), "{outcome:?}");
}

#[test]
fn suggestions_hide_inaccessible_commands() {
    let manager = guarded();
    assert_eq!(manager.suggest(Player::new(&[]), "ba"), vec!["balance"]);
    assert_eq!(
        manager.suggest(Player::new(&["mod.ban"]), "ba"),
        vec!["ban", "balance"]
    );
}
