// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use sy_core::{CommandError, CommandInput};
use sy_engine::Step;

fn counted(runs: &Arc<AtomicUsize>) -> Command<Player> {
    let runs = Arc::clone(runs);
    Command::builder("launch")
        .handler_fn(move |_| {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn cancelling_postprocessor_skips_the_handler() {
    let manager = manager();
    let runs = Arc::new(AtomicUsize::new(0));
    manager.command(counted(&runs)).unwrap();
    manager.register_postprocessor(|_: &mut CommandContext<Player>, _: &Arc<Command<Player>>| -> Step<Player> {
        Step::Cancel
    });

    let outcome = manager.execute(Player::new(&[]), "launch").await;
    assert!(outcome.is_cancelled(), "{outcome:?}");
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cancelling_preprocessor_skips_routing() {
    let manager = manager();
    let runs = Arc::new(AtomicUsize::new(0));
    manager.command(counted(&runs)).unwrap();
    let routed = Arc::new(AtomicBool::new(false));
    let seen = Arc::clone(&routed);
    manager.register_preprocessor(|_: &mut CommandContext<Player>, _: &mut CommandInput| -> Step<Player> {
        Step::Cancel
    });
    manager.register_postprocessor(
        move |_: &mut CommandContext<Player>, _: &Arc<Command<Player>>| -> Step<Player> {
            seen.store(true, Ordering::SeqCst);
            Step::Continue
        },
    );

    assert!(manager.execute(Player::new(&[]), "launch").await.is_cancelled());
    assert!(!routed.load(Ordering::SeqCst));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failing_preprocessor_resolves_as_failed() {
    let manager = manager();
    let runs = Arc::new(AtomicUsize::new(0));
    manager.command(counted(&runs)).unwrap();
    manager.register_preprocessor(|ctx: &mut CommandContext<Player>, _: &mut CommandInput| -> Step<Player> {
        Step::Fail(CommandError::Aborted {
            reason: format!("maintenance, dropped `{}`", ctx.raw_input()),
        })
    });

    let outcome = manager.execute(Player::new(&[]), "launch").await;
    assert_eq!(outcome.error().map(|e| e.kind()), Some(ErrorKind::Aborted));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn preprocessors_share_the_context_with_the_handler() {
    let manager = manager();
    manager
        .command(
            Command::builder("whoami")
                .handler_fn(|ctx| {
                    let tag = ctx.get::<String>("tag").cloned().unwrap_or_default();
                    ctx.store("reply", format!("tagged {tag}"));
                    Ok(())
                })
                .build()
                .unwrap(),
        )
        .unwrap();
    manager.register_preprocessor(|ctx: &mut CommandContext<Player>, _: &mut CommandInput| -> Step<Player> {
        ctx.store("tag", "vip".to_string());
        Step::Continue
    });

    let context = succeed(&manager, "whoami").await;
    assert_eq!(
        context.get::<String>("reply").map(String::as_str),
        Some("tagged vip")
    );
}

#[tokio::test]
async fn execution_is_lazy_until_awaited() {
    let manager = manager();
    let runs = Arc::new(AtomicUsize::new(0));
    manager.command(counted(&runs)).unwrap();

    let handle = manager.execute(Player::new(&[]), "launch");
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(handle.await.is_success());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
