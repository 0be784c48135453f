// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use std::sync::Mutex;
use sy_core::CommandError;
use sy_engine::{ExceptionContext, HandlerResult};

type Calls = Arc<Mutex<Vec<&'static str>>>;

fn recording(
    calls: &Calls,
    name: &'static str,
    result: fn() -> HandlerResult<Player>,
) -> impl Fn(&ExceptionContext<'_, Player>) -> HandlerResult<Player> + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |_: &ExceptionContext<'_, Player>| {
        calls.lock().unwrap().push(name);
        result()
    }
}

#[tokio::test]
async fn specific_handler_wins_over_later_general_one() {
    let manager = manager();
    let calls = Calls::default();
    let controller = manager.exception_controller();
    controller.register_handler(
        ErrorKind::NoSuchCommand,
        recording(&calls, "no-such-command", || HandlerResult::Handled),
    );
    controller.register_handler(
        ErrorKind::CommandParse,
        recording(&calls, "command-parse", || HandlerResult::Handled),
    );

    match manager.execute(Player::new(&[]), "nothing here").await {
        CommandOutcome::Failed(failure) => {
            assert!(failure.handled);
            assert_eq!(failure.error.kind(), ErrorKind::NoSuchCommand);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(*calls.lock().unwrap(), vec!["no-such-command"]);
}

#[tokio::test]
async fn rethrow_falls_through_to_the_parent_kind() {
    let manager = manager();
    let calls = Calls::default();
    let controller = manager.exception_controller();
    controller.register_handler(
        ErrorKind::Any,
        recording(&calls, "any", || HandlerResult::Handled),
    );
    controller.register_handler(
        ErrorKind::NoSuchCommand,
        recording(&calls, "no-such-command", || HandlerResult::Rethrow),
    );

    let outcome = manager.execute(Player::new(&[]), "missing").await;
    assert!(matches!(outcome, CommandOutcome::Failed(ref f) if f.handled));
    assert_eq!(*calls.lock().unwrap(), vec!["no-such-command", "any"]);
}

#[tokio::test]
async fn translated_failure_is_reported_in_its_new_form() {
    let manager = manager();
    manager.exception_controller().register_handler(
        ErrorKind::NoSuchCommand,
        |ctx: &ExceptionContext<'_, Player>| {
            HandlerResult::Translate(CommandError::Aborted {
                reason: format!("translated: {}", ctx.error),
            })
        },
    );

    match manager.execute(Player::new(&[]), "warp").await {
        CommandOutcome::Failed(failure) => {
            assert!(!failure.handled);
            assert_eq!(failure.error.kind(), ErrorKind::Aborted);
            assert_eq!(
                failure.error.to_string(),
                "command aborted: translated: unknown command: warp"
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn handler_errors_surface_as_command_execution() {
    let manager = manager();
    manager
        .command(
            Command::builder("explode")
                .handler_fn(|_| Err("kaboom".into()))
                .build()
                .unwrap(),
        )
        .unwrap();

    let outcome = manager.execute(Player::new(&[]), "explode").await;
    let error = outcome.error().unwrap();
    assert_eq!(error.kind(), ErrorKind::CommandExecution);
    assert_eq!(error.to_string(), "command failed: kaboom");
    assert!(outcome.context().is_some());
}
