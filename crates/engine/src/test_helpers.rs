// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{CommandManager, ExecutionCoordinator, ManagerSettings, SimpleCoordinator};
use parking_lot::Mutex;
use std::sync::Arc;
use sy_core::test_support::TestSender;
use sy_core::{Command, CommandContext, CommandFlag, HandlerError};
use sy_parsers::{IntegerParser, StringParser};
use tracing_subscriber::fmt::MakeWriter;

pub(crate) type TestManager = CommandManager<TestSender>;

/// Inputs handled so far, in order.
#[derive(Clone, Default)]
pub(crate) struct Executed(Arc<Mutex<Vec<String>>>);

impl Executed {
    pub fn all(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    fn handler(
        &self,
    ) -> impl Fn(&mut CommandContext<TestSender>) -> Result<(), HandlerError> + Send + Sync + 'static
    {
        let executed = self.clone();
        move |context: &mut CommandContext<TestSender>| {
            executed.0.lock().push(context.raw_input().to_string());
            Ok(())
        }
    }
}

/// Manager with a small command set:
///
/// - `test int <value:i32>` stores `value * 2` under `doubled`
/// - `test <text>`
/// - `say <message...> [--loud]`, permission `say`
/// - `fail`, whose handler always errors
pub(crate) fn manager_with(
    coordinator: impl ExecutionCoordinator<TestSender>,
    settings: ManagerSettings,
) -> (TestManager, Executed) {
    let manager = CommandManager::with_settings(coordinator, settings);
    let executed = Executed::default();

    let record = executed.handler();
    manager
        .command(
            Command::builder("test")
                .literal("int")
                .required("value", IntegerParser::<i32>::new())
                .handler_fn(move |context| {
                    record(context)?;
                    let value = context.get::<i32>("value").copied().unwrap_or_default();
                    context.store("doubled", value * 2);
                    Ok(())
                })
                .build()
                .unwrap(),
        )
        .unwrap();
    manager
        .command(
            Command::builder("test")
                .required("text", StringParser::single())
                .handler_fn(executed.handler())
                .build()
                .unwrap(),
        )
        .unwrap();
    manager
        .command(
            Command::builder("say")
                .required("message", StringParser::greedy_flag_yielding())
                .flag(CommandFlag::presence("loud"))
                .permission("say")
                .handler_fn(executed.handler())
                .build()
                .unwrap(),
        )
        .unwrap();
    manager
        .command(
            Command::builder("fail")
                .handler_fn(|_| Err("boom".into()))
                .build()
                .unwrap(),
        )
        .unwrap();
    (manager, executed)
}

pub(crate) fn manager() -> (TestManager, Executed) {
    manager_with(SimpleCoordinator, ManagerSettings::default())
}

pub(crate) fn player() -> TestSender {
    TestSender::new("alice")
}

// ── Log capture ─────────────────────────────────────────────────────────────

/// A writer that captures log output for testing
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.logs.lock()).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a future on a fresh runtime with captured tracing output
pub(crate) fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

pub(crate) fn assert_log(logs: &str, expected: &str) {
    assert!(logs.contains(expected), "expected {expected:?} in logs:\n{logs}");
}
